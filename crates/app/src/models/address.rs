//! Shipping address capture and validation.

use bluefruit_core::{Phone, PhoneError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::departments;

/// Field-level reasons an address form fails validation.
///
/// Validation runs entirely locally; none of these ever reach the network
/// layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The phone number is missing or does not have exactly eight digits.
    #[error("invalid phone: {0}")]
    Phone(#[from] PhoneError),

    /// The house/apartment number field is empty.
    #[error("house number is required")]
    MissingHouseNumber,

    /// No department selected.
    #[error("department is required")]
    MissingDepartment,

    /// The department is not in the lookup table.
    #[error("unknown department: {0}")]
    UnknownDepartment(String),

    /// No municipality selected.
    #[error("municipality is required")]
    MissingMunicipality,

    /// The municipality does not belong to the selected department.
    #[error("municipality {municipality} is not in department {department}")]
    MunicipalityOutsideDepartment {
        department: String,
        municipality: String,
    },
}

/// A validated shipping address, captured once per checkout attempt.
///
/// Persisted transiently until order confirmation, then discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub phone: Phone,
    pub house_number: String,
    pub department: String,
    pub municipality: String,
    #[serde(default)]
    pub notes: String,
}

impl ShippingAddress {
    /// Concatenation of house number, municipality, and department.
    #[must_use]
    pub fn full_address(&self) -> String {
        format!(
            "{}, {}, {}",
            self.house_number, self.municipality, self.department
        )
    }
}

/// In-progress address entry for the `Collecting` checkout phase.
///
/// Department and municipality are dependent selects: choosing a department
/// always clears the municipality, so a stale pairing can never survive
/// into a submitted address.
#[derive(Debug, Clone, Default)]
pub struct AddressForm {
    phone: String,
    house_number: String,
    notes: String,
    department: Option<String>,
    municipality: Option<String>,
}

impl AddressForm {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw phone input. Formatting characters are tolerated; the
    /// digit count is checked at [`AddressForm::finish`].
    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
    }

    /// Set the house/apartment number.
    pub fn set_house_number(&mut self, house_number: impl Into<String>) {
        self.house_number = house_number.into();
    }

    /// Set optional delivery notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Select a department, clearing any previously selected municipality.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::UnknownDepartment` if the name is not in the
    /// lookup table; the previous selection is cleared either way.
    pub fn select_department(&mut self, department: impl Into<String>) -> Result<(), AddressError> {
        let department = department.into();
        self.municipality = None;

        if departments::municipalities(&department).is_none() {
            self.department = None;
            return Err(AddressError::UnknownDepartment(department));
        }

        self.department = Some(department);
        Ok(())
    }

    /// Select a municipality within the currently selected department.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::MissingDepartment` if no department is
    /// selected, or `AddressError::MunicipalityOutsideDepartment` if the
    /// municipality does not belong to it.
    pub fn select_municipality(
        &mut self,
        municipality: impl Into<String>,
    ) -> Result<(), AddressError> {
        let municipality = municipality.into();
        let Some(department) = &self.department else {
            return Err(AddressError::MissingDepartment);
        };

        if !departments::contains(department, &municipality) {
            return Err(AddressError::MunicipalityOutsideDepartment {
                department: department.clone(),
                municipality,
            });
        }

        self.municipality = Some(municipality);
        Ok(())
    }

    /// The currently selected department, if any.
    #[must_use]
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    /// The currently selected municipality, if any.
    #[must_use]
    pub fn municipality(&self) -> Option<&str> {
        self.municipality.as_deref()
    }

    /// Validate the form and produce a [`ShippingAddress`].
    ///
    /// # Errors
    ///
    /// Returns the first field-level violation found: phone digits, house
    /// number, department, then municipality.
    pub fn finish(&self) -> Result<ShippingAddress, AddressError> {
        let phone = Phone::parse(&self.phone)?;

        let house_number = self.house_number.trim();
        if house_number.is_empty() {
            return Err(AddressError::MissingHouseNumber);
        }

        let department = self
            .department
            .clone()
            .ok_or(AddressError::MissingDepartment)?;
        let municipality = self
            .municipality
            .clone()
            .ok_or(AddressError::MissingMunicipality)?;

        // The selects enforce this already; re-check in case the form was
        // populated from persisted data.
        if !departments::contains(&department, &municipality) {
            return Err(AddressError::MunicipalityOutsideDepartment {
                department,
                municipality,
            });
        }

        Ok(ShippingAddress {
            phone,
            house_number: house_number.to_owned(),
            department,
            municipality,
            notes: self.notes.trim().to_owned(),
        })
    }
}

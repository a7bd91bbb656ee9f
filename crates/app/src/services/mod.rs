//! Services: the operations the UI shell drives.

mod cart;
mod catalog;
mod checkout;
mod session;

pub use cart::CartRepository;
pub use catalog::CatalogService;
pub use checkout::{CheckoutError, CheckoutOrchestrator, CheckoutState};
pub use session::{SessionError, SessionService};

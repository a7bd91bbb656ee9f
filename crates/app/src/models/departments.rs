//! Closed lookup table of El Salvador departments and their municipalities.
//!
//! Shipping addresses must name a department and one of its municipalities;
//! neither field is free text.

/// Every department with its municipalities, in display order.
pub static DEPARTMENTS: &[(&str, &[&str])] = &[
    (
        "Ahuachapán",
        &[
            "Ahuachapán",
            "Apaneca",
            "Atiquizaya",
            "Concepción de Ataco",
            "El Refugio",
            "Guaymango",
            "Jujutla",
            "San Francisco Menéndez",
            "San Lorenzo",
            "San Pedro Puxtla",
            "Tacuba",
            "Turín",
        ],
    ),
    (
        "Santa Ana",
        &[
            "Candelaria de la Frontera",
            "Chalchuapa",
            "Coatepeque",
            "El Congo",
            "El Porvenir",
            "Masahuat",
            "Metapán",
            "San Antonio Pajonal",
            "San Sebastián Salitrillo",
            "Santa Ana",
            "Santa Rosa Guachipilín",
            "Santiago de la Frontera",
            "Texistepeque",
        ],
    ),
    (
        "Sonsonate",
        &[
            "Acajutla",
            "Armenia",
            "Caluco",
            "Cuisnahuat",
            "Izalco",
            "Juayúa",
            "Nahuizalco",
            "Nahulingo",
            "Salcoatitán",
            "San Antonio del Monte",
            "San Julián",
            "Santa Catarina Masahuat",
            "Santa Isabel Ishuatán",
            "Santo Domingo Guzmán",
            "Sonsonate",
            "Sonzacate",
        ],
    ),
    (
        "Chalatenango",
        &[
            "Agua Caliente",
            "Arcatao",
            "Azacualpa",
            "Chalatenango",
            "Citala",
            "Comalapa",
            "Concepción Quezaltepeque",
            "Dulce Nombre de María",
            "El Carrizal",
            "El Paraíso",
            "La Laguna",
            "La Palma",
            "La Reina",
            "Las Vueltas",
            "Nueva Concepción",
            "Nueva Trinidad",
            "Nombre de Jesús",
            "Ojos de Agua",
            "Potonico",
            "San Antonio de la Cruz",
            "San Antonio Los Ranchos",
            "San Fernando",
            "San Francisco Lempa",
            "San Francisco Morazán",
            "San Ignacio",
            "San Isidro Labrador",
            "San José Cancasque",
            "San José Las Flores",
            "San Luis del Carmen",
            "San Miguel de Mercedes",
            "San Rafael",
            "Santa Rita",
            "Tejutla",
        ],
    ),
    (
        "La Libertad",
        &[
            "Antiguo Cuscatlán",
            "Chiltiupán",
            "Ciudad Arce",
            "Colón",
            "Comasagua",
            "Huizúcar",
            "Jayaque",
            "Jicalapa",
            "La Libertad",
            "Santa Tecla",
            "Nuevo Cuscatlán",
            "San Juan Opico",
            "Quezaltepeque",
            "Sacacoyo",
            "San José Villanueva",
            "San Matías",
            "San Pablo Tacachico",
            "Talnique",
            "Tamanique",
            "Teotepeque",
            "Tepecoyo",
            "Zaragoza",
        ],
    ),
    (
        "San Salvador",
        &[
            "Aguilares",
            "Apopa",
            "Ayutuxtepeque",
            "Cuscatancingo",
            "Ciudad Delgado",
            "El Paisnal",
            "Guazapa",
            "Ilopango",
            "Mejicanos",
            "Nejapa",
            "Panchimalco",
            "Rosario de Mora",
            "San Marcos",
            "San Martín",
            "San Salvador",
            "Santiago Texacuangos",
            "Santo Tomás",
            "Soyapango",
            "Tonacatepeque",
        ],
    ),
    (
        "Cuscatlán",
        &[
            "Candelaria",
            "Cojutepeque",
            "El Carmen",
            "El Rosario",
            "Monte San Juan",
            "Oratorio de Concepción",
            "San Bartolomé Perulapía",
            "San Cristóbal",
            "San José Guayabal",
            "San Pedro Perulapán",
            "San Rafael Cedros",
            "San Ramón",
            "Santa Cruz Analquito",
            "Santa Cruz Michapa",
            "Suchitoto",
            "Tenancingo",
        ],
    ),
    (
        "La Paz",
        &[
            "Cuyultitán",
            "El Rosario",
            "Jerusalén",
            "Mercedes La Ceiba",
            "Olocuilta",
            "Paraíso de Osorio",
            "San Antonio Masahuat",
            "San Emigdio",
            "San Francisco Chinameca",
            "San Juan Nonualco",
            "San Juan Talpa",
            "San Juan Tepezontes",
            "San Luis La Herradura",
            "San Luis Talpa",
            "San Miguel Tepezontes",
            "San Pedro Masahuat",
            "San Pedro Nonualco",
            "San Rafael Obrajuelo",
            "Santa María Ostuma",
            "Santiago Nonualco",
            "Tapalhuaca",
            "Zacatecoluca",
        ],
    ),
    (
        "Cabañas",
        &[
            "Cinquera",
            "Dolores",
            "Guacotecti",
            "Ilobasco",
            "Jutiapa",
            "San Isidro",
            "Sensuntepeque",
            "Tejutepeque",
            "Victoria",
        ],
    ),
    (
        "San Vicente",
        &[
            "Apastepeque",
            "Guadalupe",
            "San Cayetano Istepeque",
            "San Esteban Catarina",
            "San Ildefonso",
            "San Lorenzo",
            "San Sebastián",
            "San Vicente",
            "Santa Clara",
            "Santo Domingo",
            "Tecoluca",
            "Tepetitán",
            "Verapaz",
        ],
    ),
    (
        "Usulután",
        &[
            "Alegría",
            "Berlín",
            "California",
            "Concepción Batres",
            "El Triunfo",
            "Ereguayquín",
            "Estanzuelas",
            "Jiquilisco",
            "Jucuapa",
            "Jucuarán",
            "Mercedes Umaña",
            "Nueva Granada",
            "Ozatlán",
            "Puerto El Triunfo",
            "San Agustín",
            "San Buenaventura",
            "San Dionisio",
            "San Francisco Javier",
            "Santa Elena",
            "Santa María",
            "Santiago de María",
            "Tecapán",
            "Usulután",
        ],
    ),
    (
        "San Miguel",
        &[
            "Carolina",
            "Chapeltique",
            "Chinameca",
            "Chirilagua",
            "Ciudad Barrios",
            "Comacarán",
            "El Tránsito",
            "Lolotique",
            "Moncagua",
            "Nueva Guadalupe",
            "Nuevo Edén de San Juan",
            "Quelepa",
            "San Antonio del Mosco",
            "San Gerardo",
            "San Jorge",
            "San Luis de la Reina",
            "San Miguel",
            "San Rafael Oriente",
            "Sesori",
            "Uluazapa",
        ],
    ),
    (
        "Morazán",
        &[
            "Arambala",
            "Cacaopera",
            "Chilanga",
            "Corinto",
            "Delicias de Concepción",
            "El Divisadero",
            "El Rosario",
            "Gualococti",
            "Guatajiagua",
            "Joateca",
            "Jocoaitique",
            "Jocoro",
            "Lolotiquillo",
            "Meanguera",
            "Osicala",
            "Perquín",
            "San Carlos",
            "San Fernando",
            "San Francisco Gotera",
            "San Isidro",
            "San Simón",
            "Sensembra",
            "Sociedad",
            "Torola",
            "Yamabal",
            "Yoloaiquín",
        ],
    ),
    (
        "La Unión",
        &[
            "Anamorós",
            "Bolívar",
            "Concepción de Oriente",
            "Conchagua",
            "El Carmen",
            "El Sauce",
            "Intipucá",
            "La Unión",
            "Lilisque",
            "Meanguera del Golfo",
            "Nueva Esparta",
            "Pasaquina",
            "Polorós",
            "San Alejo",
            "San José",
            "Santa Rosa de Lima",
            "Yayantique",
            "Yucuaiquín",
        ],
    ),
];

/// Iterate department names in display order.
pub fn department_names() -> impl Iterator<Item = &'static str> {
    DEPARTMENTS.iter().map(|(name, _)| *name)
}

/// The municipalities of `department`, or `None` for an unknown department.
#[must_use]
pub fn municipalities(department: &str) -> Option<&'static [&'static str]> {
    DEPARTMENTS
        .iter()
        .find(|(name, _)| *name == department)
        .map(|(_, towns)| *towns)
}

/// Whether `municipality` belongs to `department`.
#[must_use]
pub fn contains(department: &str, municipality: &str) -> bool {
    municipalities(department).is_some_and(|towns| towns.contains(&municipality))
}

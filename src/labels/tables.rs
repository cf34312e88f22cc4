// src/labels/tables.rs
//! Static label vocabularies, one table per field group.
//!
//! Keys are written as they appear in the survey export; they are run through
//! `normalize` when the translator is built, so accents and capitals here are
//! only for readability. Targets must already be in normalized form.

/// Bumped whenever any table below changes.
pub const MAPPINGS_VERSION: &str = "2025.09-1";

pub const WEEKDAY: &[(&str, &str)] = &[
    ("Lunes", "monday"),
    ("Martes", "tuesday"),
    ("Miércoles", "wednesday"),
    ("Jueves", "thursday"),
    ("Viernes", "friday"),
    ("Sábado", "saturday"),
    ("Domingo", "sunday"),
    ("Festivos", "holidays"),
];

/// Home-delivery transport modes.
pub const DELIVERY_MODE: &[(&str, &str)] = &[
    ("Motocicleta", "motorcycle"),
    ("No se realizan domicilios", "no_deliveries"),
    ("Furgón", "van_car"),
    ("Carreta \"zorrilla\"", "handcart"),
    ("Carreta zorrilla", "handcart"),
    ("Carreta", "handcart"),
    ("Caminata", "walking"),
    ("Vehículo particular", "van_car"),
    ("Van", "van_car"),
    ("Carro particular", "van_car"),
    ("Camioneta", "van_car"),
    ("Transportadora", "carrier"),
    ("Transportadoras", "carrier"),
    ("Trasnportadora", "carrier"),
    ("Empresa transportadora", "carrier"),
    ("Servicio de mensajería", "carrier"),
    ("Servicios de mensajería", "carrier"),
    ("Mensajeria contratada", "carrier"),
    ("Bicicleta normal", "bike_cargo_bike"),
    ("Bicicleta de carga", "bike_cargo_bike"),
    ("Motocarga gasolina", "threewheeler"),
    ("No aplica", "no_deliveries"),
    ("No se hacen envíos", "no_deliveries"),
    ("Na", "no_deliveries"),
    ("No", "no_deliveries"),
    ("Ninguno", "no_deliveries"),
    ("Ninguna", "no_deliveries"),
];

/// Transport modes for online-sale shipments. "Furgón" is a small truck here,
/// unlike home deliveries.
pub const ONLINE_DELIVERY_MODE: &[(&str, &str)] = &[
    ("Motocicleta", "motorcycle"),
    ("Furgón", "small_truck"),
    ("Vehículo particular", "van_car"),
    ("Camioneta", "van_car"),
    ("Van", "van_car"),
    ("Carreta \"zorrilla\"", "handcart"),
    ("Carreta zorrilla", "handcart"),
    ("Caminata", "walking"),
    ("Bicicleta normal", "bike_cargo_bike"),
    ("Bicicleta de carga", "bike_cargo_bike"),
    ("Transportadora", "carrier"),
    ("Transportadoras", "carrier"),
    ("Trnasportadora", "carrier"),
    ("Empresa transportadora", "carrier"),
    ("Servicio de mensajería", "carrier"),
    ("Servicios de mensajería", "carrier"),
    ("Mensajería contratada", "carrier"),
    ("Rappifavor", "carrier"),
    ("No se realizan ventas por internet", "no_deliveries"),
    ("Si se realizan ventas por internet", "no_deliveries"),
    ("Realizan venta por Internet", "no_deliveries"),
    ("Mostrador", "no_deliveries"),
    ("Cliente recoje en negocio", "no_deliveries"),
    ("Cliente recoge", "no_deliveries"),
    ("No se realiza", "no_deliveries"),
    ("Novse hace envíos", "no_deliveries"),
    ("Na", "no_deliveries"),
    ("No", "no_deliveries"),
    ("Ninguno", "no_deliveries"),
    ("Ninguna", "no_deliveries"),
];

/// How goods enter the establishment: vehicle and unloading location.
pub const UNLOADING: &[(&str, &str)] = &[
    ("Camión", "truck"),
    ("En camión", "truck"),
    ("Motocicleta", "motorcycle"),
    ("En motocicleta", "motorcycle"),
    ("Bicicleta", "bicycle"),
    ("En bicicleta", "bicycle"),
    ("Carreta", "handcart"),
    ("En carreta", "handcart"),
    ("Vehículo particular", "private_vehicle"),
    ("Particular", "private_vehicle"),
    ("Sobre la vía", "on_the_road"),
    ("Sobre el andén", "on_the_sidewalk"),
    ("Bahía", "loading_zone"),
    ("Bahía de cargue", "loading_zone"),
    ("Internamente", "establishment_facilities"),
    ("Vías aledañas", "nearby_roads"),
    ("Parqueadero", "parking_lot"),
];

pub const EQUIPMENT: &[(&str, &str)] = &[
    ("Carretilla", "handcart"),
    ("Carretilla entra", "handcart"),
    ("Elevador", "elevator"),
    ("Rampa fija", "fixed_loading_ramp"),
    ("Montacargas", "loading_ramp"),
    ("Rampa mecánica", "loading_ramp"),
    ("Gato hidráulico", "loading_ramp"),
    ("Escaleras eléctricas", "other"),
    ("Escalas", "other"),
    ("Porta doble", "other"),
    ("Caminata", "manual_workforce"),
    ("Camina", "manual_workforce"),
    ("Caminando", "manual_workforce"),
    ("Al hombro", "manual_workforce"),
    ("Descargue a mano", "manual_workforce"),
    ("A mano", "manual_workforce"),
    ("Personal externo", "manual_workforce"),
    ("La misma persona la carga en sus manos", "manual_workforce"),
    ("Las personas lo llevan cargados", "manual_workforce"),
    ("Na", "none"),
    ("1", "none"),
    ("No", "none"),
    ("No posee", "none"),
    ("No aplica", "none"),
    ("No hay bodega", "none"),
    ("Cajas", "none"),
    ("Bahía", "none"),
    ("Parqueadero de uso interno", "none"),
    ("Parqueadero para clientes", "none"),
    ("No se requiere por el volumen", "none"),
    ("No es necesario entra oaquete manual", "none"),
    ("No se requiere lis paquetes vson pequeños sebtraen a mano", "none"),
    ("Ninguno", "none"),
    ("Ninguna", "none"),
    ("Ninguno de los anteriores", "none"),
];

pub const POPULATION_GROUP: &[(&str, &str)] = &[
    ("Madre cabeza de hogar", "head_of_household_mother"),
    ("Madres cabeza de hogar", "head_of_household_mother"),
    ("Víctima del conflicto armado", "armed_conflict_victim"),
    ("Víctimas del conflicto armado", "armed_conflict_victim"),
    ("Afrodescendiente", "afro_descendant"),
    ("Afrocolombiana", "afro_descendant"),
    ("Indígena", "indigenous"),
    ("Migrante", "migrant"),
    ("Población migrante", "migrant"),
    ("Persona con discapacidad", "disability"),
    ("Discapacidad", "disability"),
    ("LGBTIQ+", "lgbtiq"),
    ("Población LGBTIQ+", "lgbtiq"),
    ("Campesina", "rural"),
    ("Ninguno", "none"),
    ("Ninguna", "none"),
    ("No aplica", "none"),
    ("No", "none"),
];

/// Main category of the economic-activity answer.
pub const ESTABLISHMENT_TYPE: &[(&str, &str)] = &[
    ("Proveedor", "supplier"),
    ("Venta al detalle", "retailer"),
    ("Fabricante", "manufacturer"),
    ("Ventas por internet", "e_commerce"),
    ("Transportador", "carrier"),
];

pub const WAREHOUSE_OWNERSHIP: &[(&str, &str)] = &[
    ("Externo, alquilado", "external_rented"),
    ("Externo, compartido con otros comercios", "external_shared"),
    ("Externo, propio", "external_own"),
    ("Interno", "internal"),
    ("No", "none"),
];

pub const WAREHOUSE_TYPE: &[(&str, &str)] = &[
    ("Bodega", "warehouse"),
    ("Local comercial", "commercial_premises"),
    ("Mezzanine", "mezzanine"),
    ("Mezanine", "mezzanine"),
    ("Sótano", "basement"),
    ("Contenedor", "container"),
    ("Otro ¿cuál?", "other"),
    ("Otro", "other"),
];

/// Ordinal weekly-frequency levels (labels produced by the ordinal domain).
pub const WEEKLY_FREQUENCY: &[(&str, &str)] = &[
    ("mensual", "monthly"),
    ("quincenal", "biweekly"),
    ("1 vez por semana", "1 time a week"),
    ("2 veces por semana", "2 times a week"),
    ("3 veces por semana", "3 times a week"),
    ("4 veces por semana", "4 times a week"),
    ("5 veces por semana", "5 times a week"),
    ("6 o más veces por semana", "6 times or more a week"),
];

/// Ordinal fleet age bands (labels produced by the ordinal domain).
pub const AGE_BAND: &[(&str, &str)] = &[
    ("0-5 años", "0-5 years"),
    ("6-10 años", "6-10 years"),
    ("11-15 años", "11-15 years"),
    ("16-20 años", "16-20 years"),
    ("más de 20 años", "more than 20 years"),
];

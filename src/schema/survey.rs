// src/schema/survey.rs
//! Column dictionary of the ZUAP urban-logistics survey export.

use super::types::{ColumnDefinition, ColumnTag, SemanticType::*};
use crate::labels::FieldGroup;

fn def(raw: &str, label: &str, ty: super::SemanticType) -> ColumnDefinition {
    ColumnDefinition::new(raw, label, ty)
}

/// Every column of the export, in questionnaire order.
pub fn columns() -> Vec<ColumnDefinition> {
    vec![
        // ── identification ─────────────────────────────────────────────
        def("id", "id", Identifier),
        def("db", "db", Text),
        def("Marca temporal", "timestamp", Datetime),
        def("Correo electrónico", "email", TextEmail),
        def("Nombre de la empresa", "company_name", Text),
        def("Dirección de la empresa", "est_address", Text),
        def("Teléfono de contacto", "contact_phone", TextPhone),
        // ── people & gender ────────────────────────────────────────────
        def(
            "Por favor indique el número de colaboradores que tiene su empresa o comercio",
            "employees",
            Count,
        ),
        def(
            "¿En su empresa o comercio cuentan con colaboradoras mujeres?",
            "has_female_employees",
            Binary,
        ),
        def(
            "Por favor indique el número de mujeres que trabajan en su empresa o comercio",
            "female_employees",
            Count,
        ),
        def("Porcentaje mujeres", "female_percentage", Percent),
        def(
            "De sus empleadas mujeres, ¿cuántas hacen parte de la cadena de distribución del negocio (conducen, reparten domicilios, acompañan las entregas, etc.)?",
            "female_emplo_distri",
            Count,
        ),
        def("% mujeres en la distribución", "women_distri_percentage", Percent),
        def(
            "De las mujeres vinculadas a la cadena logística de su empresa o comercio ¿cuántas están vinculadas por contrato laboral?",
            "female_distri_vincu",
            Count,
        ),
        def("% mujeres vinculadas", "hired_women_percentage", Percent),
        def(
            "Entre sus colaboradoras mujeres, alguna(s) se identifica(n) con los siguientes grupos poblacionales:",
            "female_popg",
            MultiNominal,
        )
        .group(FieldGroup::PopulationGroup),
        def(
            "¿Acompañan y/o apoyan el proceso formativo de las mujeres que hacen parte de la cadena logística?",
            "female_support",
            Binary,
        ),
        // ── economic activity ──────────────────────────────────────────
        def(
            "Por favor, indique dentro de la siguientes categorías, cuál se relaciona con la actividad realizada en su comercio:",
            "economic_activity",
            Nominal,
        )
        .tag(ColumnTag::EconomicActivity),
        def(
            "De acuerdo al listado señale en orden de importancia las 3 principales actividades comerciales que se desarrollan en su establecimiento:",
            "specific_activity",
            MultiNominal,
        ),
        def("Productos principales", "main_products", Nominal),
        // ── freight origin & downtown operation ────────────────────────
        def(
            "De acuerdo con el tipo de carga que distribuye su empresa, indique máximo 3 tipos en el siguiente listado:",
            "cargo_types",
            MultiNominal,
        ),
        def(
            "¿El origen de la mercancía que transporta es el Valle de Aburrá?",
            "origin_aburra_valley",
            Binary,
        ),
        def("Por favor, indique el municipio:", "origin_municipality", Nominal),
        def(
            "Por favor, indique cuántas entregas hace en el centro de Medellín al día:",
            "daily_downtown_deliveries",
            Count,
        ),
        def(
            "Por favor, indique el número de establecimientos que surte en el centro de Medellín a diario:",
            "daily_downtown_establishments",
            Count,
        ),
        def(
            "¿Cuántos pedidos recibe su empresa diariamente que tienen como destino el centro de Medellín?",
            "daily_downtown_orders",
            Count,
        ),
        // ── fleet ──────────────────────────────────────────────────────
        def(
            "Por favor indique la cantidad de vehículos con combustión a diésel (ACPM) con los que cuenta su empresa:",
            "vehicles_diesel",
            Count,
        )
        .tag(ColumnTag::VehicleCount),
        def(
            "Por favor indique la cantidad de vehículos con combustión a gasolina con los que cuenta su empresa:",
            "vehicles_gasoline",
            Count,
        )
        .tag(ColumnTag::VehicleCount),
        def(
            "Por favor indique la cantidad de vehículos con combustión a gas natural vehicular (GNV) con los que cuenta su empresa:",
            "vehicles_cng",
            Count,
        )
        .tag(ColumnTag::VehicleCount),
        def(
            "Por favor indique la cantidad de vehículos con motor eléctrico con los que cuenta su empresa:",
            "vehicles_electric",
            Count,
        )
        .tag(ColumnTag::VehicleCount),
        def(
            "Por favor, indique el rango de edad promedio del parque vehicular de su empresa [Modelos anteriores a 1990]",
            "fleet_age_pre_1990",
            OrdinalAgeband,
        )
        .group(FieldGroup::AgeBand),
        def(
            "Por favor, indique el rango de edad promedio del parque vehicular de su empresa [Modelos entre 1991 y 2000]",
            "fleet_age_1991_2000",
            OrdinalAgeband,
        )
        .group(FieldGroup::AgeBand),
        def(
            "Por favor, indique el rango de edad promedio del parque vehicular de su empresa [Modelos entre 2001 y 2010]",
            "fleet_age_2001_2010",
            OrdinalAgeband,
        )
        .group(FieldGroup::AgeBand),
        def(
            "Por favor, indique el rango de edad promedio del parque vehicular de su empresa [Modelos entre 2011 y 2015]",
            "fleet_age_2011_2015",
            OrdinalAgeband,
        )
        .group(FieldGroup::AgeBand),
        def(
            "Por favor, indique el rango de edad promedio del parque vehicular de su empresa [Modelos del 2016 en adelante]",
            "fleet_age_2016_plus",
            OrdinalAgeband,
        )
        .group(FieldGroup::AgeBand),
        def(
            "¿Cuánto es el rendimiento en galones/kilómetro, de sus vehículos a ACPM?",
            "fuel_efficiency_diesel",
            Continuous,
        ),
        def(
            "¿Cuánto es el rendimiento en galones/kilómetro, de sus vehículos a gasolina?",
            "fuel_efficiency_gasoline",
            Continuous,
        ),
        def(
            "¿Cuánto es el rendimiento en metros cúbicos/kilómetro, de sus vehículos a GNV?",
            "fuel_efficiency_cng",
            Continuous,
        ),
        def(
            "¿Cuánto es el rendimiento kilowatt-hora, de sus vehículos eléctricos?",
            "energy_efficiency_electric",
            Continuous,
        ),
        def(
            "¿Cuánto es el costo total por movilizar un camión cargado hacia el centro de Medellín?",
            "truck_trip_cost",
            Continuous,
        ),
        def(
            "¿Cuántas horas al volante permanece durante un turno de reparto una/un conductora/or en su empresa?",
            "driver_hours_per_shift",
            Continuous,
        ),
        def(
            "De acuerdo con la siguiente escala, donde 1 es \"Muy compleja\" y 5 es \"Muy adecuada\" ¿Cómo considera la relación de sus conductores con los demás actores viales (peatones, ciclistas, conductores, transporte público) en el espacio público de la ZUAP?",
            "driver_road_relation",
            OrdinalScale,
        ),
        // ── wellbeing & regulation ─────────────────────────────────────
        def(
            "¿Al interior de su empresa se realizan actividades que promuevan la actividad física entre sus calaboradoras/es?",
            "physical_activity_programs",
            Binary,
        ),
        def("¿Qué actividades se realizan?", "physical_activities", Text),
        def(
            "¿Cuántas veces por semana se realizan actividades para promover la actividad física?",
            "physical_activity_frequency",
            OrdinalFrequency,
        )
        .group(FieldGroup::WeeklyFrequency),
        def(
            "¿Conoce usted el Decreto No 1790 de noviembre 20 de 2012 (Decreto de Zona Amarilla o de cargue y descargue en el centro de la ciudad)?",
            "yellow_zone_decree_awareness",
            Binary,
        ),
        // ── warehouse ──────────────────────────────────────────────────
        def(
            "¿Su establecimiento cuenta con espacio de bodega o almacenamiento de mercancías o productos?",
            "warehouse",
            Nominal,
        )
        .group(FieldGroup::WarehouseOwnership),
        def("¿Con cuántos espacios de bodega cuenta?", "number_warehouse", Count),
        def(
            "¿En qué piso se ubica(n) la(s) bodegas que sirven a su empresa o comercio?",
            "warehouse_floor",
            OrdinalFloor,
        ),
        def(
            "Por favor, indique el área de la bodega que sirve a su comercio en metros cuadrados:",
            "warehouse_area",
            Continuous,
        ),
        def(
            "Por favor, indique la altura en metros de la bodega que sirve a su comercio:",
            "warehouse_height",
            Continuous,
        ),
        def(
            "¿El(los) espacio(s) de bodega están ubicados al interior de la ZUAP?",
            "zuap_warehouse",
            Binary,
        ),
        def(
            "¿En qué municipio se encuentra ubicada la bodega que sirve a su comercio?",
            "warehouse_municipality",
            Nominal,
        ),
        def(
            "Por favor, indique el tipo de bodega con la que cuenta:",
            "warehouse_type",
            Nominal,
        )
        .group(FieldGroup::WarehouseType),
        def(
            "¿El establecimiento o bodega posee alguno de los siguientes elementos para el cargue y descargue de mercancías?",
            "warehouse_equipement",
            MultiNominal,
        )
        .group(FieldGroup::Equipment),
        // ── supply flow ────────────────────────────────────────────────
        def(
            "Por favor, seleccione los días en los cuales recibe materiales, materias primas o productos:",
            "supply_day",
            MultiNominal,
        )
        .group(FieldGroup::Weekday),
        def(
            "¿Cuántas veces por semana abastece su establecimiento?",
            "supply_week",
            OrdinalFrequency,
        )
        .group(FieldGroup::WeeklyFrequency),
        def(
            "Por favor, indique los horarios durante los cuales realiza las actividades de cargue y descargue de las mercancías:",
            "supply_schedule",
            MultiNominal,
        ),
        def(
            "Por favor, indique la forma en la que ingresa la mercancía a su comercio o área de bodega:",
            "supply_unloading",
            MultiNominal,
        )
        .group(FieldGroup::Unloading),
        def(
            "En una escala de 1 a 5, donde 1 es \"muy inseguro\" y 5 \"muy seguro\", ¿considera usted que el proceso de cargue y descargue de mercancías en camión, carro o motocicleta es?",
            "supply_safety_percep",
            OrdinalScale,
        ),
        def(
            "En una escala de 1 a 5, donde 1 es \"muy inseguro\" y 5 \"muy seguro\", ¿considera usted que el proceso de cargue y descargue de mercancías en bicicleta es?",
            "supply_bic_safety_perception",
            OrdinalScale,
        ),
        // ── deliveries ─────────────────────────────────────────────────
        def(
            "¿Qué medio realiza para el envío de sus artículos a domicilio?",
            "delivery_transp_mode",
            MultiNominal,
        )
        .group(FieldGroup::DeliveryMode),
        def(
            "¿Cuántos domicilios realiza a diario su establecimiento?",
            "num_deliveries",
            Count,
        ),
        def(
            "¿Qué medio realiza para el envío de sus ventas por internet?",
            "online_trans_mode",
            MultiNominal,
        )
        .group(FieldGroup::OnlineDeliveryMode),
        def(
            "¿Cuántos envíos de artículos vendidos por internet realiza a diario su establecimiento?",
            "num_online_deliveries",
            Count,
        ),
        // ── survey navigation ──────────────────────────────────────────
        def("Ir al fin de la encuesta.", "end_of_survey", Ignore),
    ]
}

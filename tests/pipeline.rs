use anyhow::Result;
use std::fs;
use std::io::Cursor;
use tempfile::tempdir;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use zuapclean::{
    config::PipelineConfig,
    dataset::{ColumnData, DerivedDataset},
    diagnostics::DiagnosticKind,
    pipeline::{self, Pipeline, PipelineOutput},
    process::RecordKey,
};

const DAYS: &str =
    "Por favor, seleccione los días en los cuales recibe materiales, materias primas o productos:";
const ZUAP: &str = "¿El(los) espacio(s) de bodega están ubicados al interior de la ZUAP?";
const SAFETY: &str = "En una escala de 1 a 5, donde 1 es \"muy inseguro\" y 5 \"muy seguro\", ¿considera usted que el proceso de cargue y descargue de mercancías en camión, carro o motocicleta es?";
const MODE: &str = "¿Qué medio realiza para el envío de sus artículos a domicilio?";
const STAMP: &str = "Marca temporal";

fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,zuapclean=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn export(rows: &[[&str; 8]]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["id", "db", STAMP, DAYS, ZUAP, SAFETY, MODE, "Pregunta nueva"])?;
    for r in rows {
        wtr.write_record(r)?;
    }
    Ok(wtr.into_inner()?)
}

fn survey() -> Result<Vec<u8>> {
    export(&[
        ["1", "zuap", "3/10/2023 14:05:09", "Lunes, Martes y Viernes", "Sí", "4", "Motocicleta; Furgón", "x"],
        ["2", "zuap", "3/10/2023 15:00:00", "Sábado", "no aplica", "7", "Caminata y Trasnportadora", "y"],
        ["", "otra", "", "Domingo", "No", "2", "Dron", "z"],
        ["4", "otra", "04/10/2023", "", "", "", "", ""],
    ])
}

fn run_in_memory() -> Result<PipelineOutput> {
    init_test_logging();
    Pipeline::builtin().process_reader(Cursor::new(survey()?), b',')
}

fn view<'a>(out: &'a PipelineOutput, name: &str) -> &'a DerivedDataset {
    out.view(name).unwrap_or_else(|| panic!("view {name} missing"))
}

fn bools(ds: &DerivedDataset, column: &str) -> Vec<Option<bool>> {
    match &ds.column(column).unwrap_or_else(|| panic!("{column} missing")).data {
        ColumnData::Bool(v) => v.clone(),
        other => panic!("{column}: unexpected encoding {other:?}"),
    }
}

#[test]
fn binary_answers_and_not_applicable() -> Result<()> {
    let out = run_in_memory()?;
    let basic = view(&out, "basic");

    assert_eq!(
        bools(basic, "zuap_warehouse"),
        vec![Some(true), None, Some(false), None]
    );
    let failures: Vec<_> = out
        .diagnostics
        .of_kind(DiagnosticKind::CoercionFailure)
        .filter(|d| d.column == "zuap_warehouse")
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].record, "id=2");
    Ok(())
}

#[test]
fn receiving_days_become_weekday_indicators() -> Result<()> {
    let out = run_in_memory()?;

    let basic = view(&out, "basic");
    assert_eq!(
        basic.column("supply_day").unwrap().data.render(0).as_deref(),
        Some("lunes;martes;viernes")
    );
    let translated = view(&out, "translated");
    assert_eq!(
        translated.column("supply_day").unwrap().data.render(0).as_deref(),
        Some("friday;monday;tuesday")
    );

    let famd = view(&out, "famd_ready");
    let row = famd.row_of(RecordKey::Id(1)).unwrap();
    for day in ["monday", "tuesday", "friday"] {
        assert_eq!(bools(famd, &format!("supply_day__{day}"))[row], Some(true), "{day}");
    }
    for day in ["saturday", "sunday"] {
        assert_eq!(bools(famd, &format!("supply_day__{day}"))[row], Some(false), "{day}");
    }
    // missing answer: every indicator false
    let empty = famd.row_of(RecordKey::Id(4)).unwrap();
    assert_eq!(bools(famd, "supply_day__monday")[empty], Some(false));
    Ok(())
}

#[test]
fn unknown_column_is_reported_once_and_dropped() -> Result<()> {
    let out = run_in_memory()?;
    assert_eq!(out.diagnostics.count(DiagnosticKind::UnknownColumn), 1);
    let d = out.diagnostics.of_kind(DiagnosticKind::UnknownColumn).next().unwrap();
    assert_eq!(d.column, "Pregunta nueva");

    for v in &out.views {
        assert!(
            v.column_names().all(|c| !c.contains("pregunta") && c != "Pregunta nueva"),
            "{} leaks the unknown column",
            v.name()
        );
        assert!(v.num_rows() >= 3);
    }
    Ok(())
}

#[test]
fn scale_outside_domain_is_missing_but_row_is_kept() -> Result<()> {
    let out = run_in_memory()?;
    let basic = view(&out, "basic");

    assert_eq!(
        basic.column("supply_safety_percep").unwrap().data,
        ColumnData::Int(vec![Some(4), None, Some(2), None])
    );
    assert!(basic.row_of(RecordKey::Id(2)).is_some());
    assert!(out
        .diagnostics
        .of_kind(DiagnosticKind::CoercionFailure)
        .any(|d| d.column == "supply_safety_percep" && d.record == "id=2"));
    Ok(())
}

#[test]
fn famd_ready_ids_are_a_subset_of_translated_ids() -> Result<()> {
    let out = run_in_memory()?;
    let translated = view(&out, "translated");
    let famd = view(&out, "famd_ready");

    assert_eq!(translated.num_rows(), 4);
    assert_eq!(famd.num_rows(), 3);
    for key in &famd.keys {
        assert!(translated.row_of(*key).is_some(), "{key} not in translated");
    }
    assert_eq!(famd.ids(), vec![Some(1), Some(2), Some(4)]);
    Ok(())
}

#[test]
fn unmapped_labels_pass_through_and_are_aggregated() -> Result<()> {
    let out = run_in_memory()?;
    let translated = view(&out, "translated");
    assert_eq!(
        translated.column("delivery_transp_mode").unwrap().data.render(2).as_deref(),
        Some("dron")
    );
    assert_eq!(
        translated.column("delivery_transp_mode").unwrap().data.render(1).as_deref(),
        Some("carrier;walking")
    );
    let unmapped: Vec<_> = out
        .diagnostics
        .of_kind(DiagnosticKind::UnmappedLabel)
        .filter(|d| d.column == "delivery_transp_mode")
        .collect();
    assert_eq!(unmapped.len(), 1);
    assert!(unmapped[0].reason.contains("dron"));
    Ok(())
}

#[test]
fn runs_are_deterministic() -> Result<()> {
    let a = run_in_memory()?;
    let b = run_in_memory()?;
    assert_eq!(a.canonical, b.canonical);
    assert_eq!(a.views, b.views);
    assert_eq!(a.diagnostics, b.diagnostics);
    Ok(())
}

#[test]
fn full_run_writes_every_output() -> Result<()> {
    init_test_logging();
    let dir = tempdir()?;
    let input = dir.path().join("encuesta.csv");
    fs::write(&input, survey()?)?;

    let mut config = PipelineConfig::new(&input);
    config.output_dir = dir.path().join("out");
    let out = pipeline::run(&config)?;

    for name in ["basic", "translated", "famd_ready", "optimized"] {
        assert!(config.output_dir.join(format!("{name}.csv")).exists(), "{name}.csv");
        assert!(config.output_dir.join(format!("{name}.parquet")).exists(), "{name}.parquet");
    }
    let basic = fs::read_to_string(config.output_dir.join("basic.csv"))?;
    assert!(basic.starts_with("id,db,timestamp,"));
    assert!(basic.contains("2023-10-03T14:05:09"));

    let diagnostics = fs::read_to_string(config.output_dir.join(pipeline::DIAGNOSTICS_FILE))?;
    assert_eq!(diagnostics.lines().count(), out.diagnostics.len() + 1);

    let quality = fs::read_to_string(config.output_dir.join(pipeline::QUALITY_FILE))?;
    assert!(quality.lines().any(|l| l.starts_with("supply_day,multi_nominal,1,0,25.0,Fair")));
    Ok(())
}

#[test]
fn custom_dictionary_and_no_parquet() -> Result<()> {
    init_test_logging();
    let dir = tempdir()?;
    let input = dir.path().join("ranking.csv");
    fs::write(&input, "id;Rango;Otra\n1;2;a\n2;5;b\n")?;
    let dict = dir.path().join("dictionary.json");
    fs::write(
        &dict,
        r#"[
            {"raw_name": "id", "canonical_label": "id", "semantic_type": "identifier", "storage_type": "numeric"},
            {"raw_name": "Rango", "canonical_label": "importance", "semantic_type": "ordinal_rank", "storage_type": "numeric"}
        ]"#,
    )?;

    let mut config = PipelineConfig::new(&input);
    config.output_dir = dir.path().join("out");
    config.dictionary = Some(dict);
    config.delimiter = b';';
    config.write_parquet = false;
    let out = pipeline::run(&config)?;

    assert!(!config.output_dir.join("basic.parquet").exists());
    let optimized = view(&out, "optimized");
    assert_eq!(
        optimized.column("importance__rank").unwrap().data,
        ColumnData::Int(vec![Some(2), None])
    );
    assert_eq!(out.diagnostics.count(DiagnosticKind::CoercionFailure), 1);
    assert_eq!(out.diagnostics.count(DiagnosticKind::UnknownColumn), 1);
    Ok(())
}

#[test]
fn duplicate_ids_keep_the_first_response() -> Result<()> {
    init_test_logging();
    let data = export(&[
        ["9", "zuap", "", "Lunes", "Sí", "3", "", ""],
        ["9", "otra", "", "Martes", "No", "1", "", ""],
    ])?;
    let out = Pipeline::builtin().process_reader(Cursor::new(data), b',')?;

    assert_eq!(out.diagnostics.count(DiagnosticKind::DuplicateRecord), 1);
    let basic = view(&out, "basic");
    assert_eq!(basic.num_rows(), 1);
    assert_eq!(basic.column("db").unwrap().data.render(0).as_deref(), Some("zuap"));
    Ok(())
}

#[test]
fn overflowing_fleet_is_reported_not_fatal() -> Result<()> {
    init_test_logging();
    let diesel = "Por favor indique la cantidad de vehículos con combustión a diésel (ACPM) con los que cuenta su empresa:";
    let gasoline = "Por favor indique la cantidad de vehículos con combustión a gasolina con los que cuenta su empresa:";
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["id", diesel, gasoline])?;
    wtr.write_record(["1", "9000000000000000000", "9000000000000000000"])?;
    wtr.write_record(["2", "2", "5"])?;
    let out = Pipeline::builtin().process_reader(Cursor::new(wtr.into_inner()?), b',')?;

    let translated = view(&out, "translated");
    assert_eq!(
        translated.column("fleet_total").unwrap().data,
        ColumnData::Int(vec![None, Some(7)])
    );
    assert!(out
        .diagnostics
        .of_kind(DiagnosticKind::CoercionFailure)
        .any(|d| d.column == "fleet_total" && d.record == "id=1"));
    Ok(())
}

#[test]
fn none_like_answers_are_not_reported_as_unmapped() -> Result<()> {
    let data = export(&[
        ["1", "zuap", "", "Lunes", "Sí", "3", "Ninguna de las anteriores", ""],
        ["2", "zuap", "", "Martes", "No", "2", "Motocicleta", ""],
    ])?;
    let out = Pipeline::builtin().process_reader(Cursor::new(data), b',')?;

    let translated = view(&out, "translated");
    assert_eq!(
        translated.column("delivery_transp_mode").unwrap().data.render(0).as_deref(),
        Some("no_deliveries")
    );
    assert_eq!(out.diagnostics.count(DiagnosticKind::UnmappedLabel), 0);
    Ok(())
}

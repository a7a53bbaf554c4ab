use gdp_dashboard::data::{DataProcessor, YearValue};
use gdp_dashboard::{AnalysisRun, DashboardConfig, PipelineError};
use std::fs;
use std::path::Path;

const DEV_HEADER: &str = "Country,Region,IncomeGroup,ExternalDebtReportingStatus,CurrencyUnit,SystemOfTrade,LatestPopulationCensus,SpecialNotes";

fn write_fixture(dir: &Path, gdp: &str, development: &str) -> DashboardConfig {
    fs::write(dir.join("gdp_per_capita.csv"), gdp).expect("write gdp fixture");
    fs::write(dir.join("development_data.csv"), development).expect("write development fixture");
    DashboardConfig {
        data_dir: dir.to_path_buf(),
        ..DashboardConfig::default()
    }
}

#[test]
fn single_country_example_yields_undefined_correlations() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(
        dir.path(),
        "Sr.No,Country,1970,1971\n1,Aland,100,150\n",
        &format!("{DEV_HEADER}\nAland,Europe,High income,Actual,Euro,General trade system,2011,\n"),
    );

    let run = AnalysisRun::execute(&config, None).expect("pipeline run");

    assert_eq!(run.encodings[0].labels, vec!["Europe"]);
    assert_eq!(run.merged.height(), 2);
    assert_eq!(run.correlations.len(), 6);
    for series in &run.correlations {
        let years: Vec<&str> = series.points.iter().map(|p| p.year.as_str()).collect();
        assert_eq!(years, vec!["1970", "1971"]);
        assert!(series.points.iter().all(|p| p.correlation.is_none()));
    }

    assert_eq!(run.selected_country.as_deref(), Some("Aland"));
    assert_eq!(
        run.country_series,
        vec![
            YearValue { year: "1970".into(), value: Some(100.0) },
            YearValue { year: "1971".into(), value: Some(150.0) },
        ]
    );
    let mut distribution = run.distribution.clone();
    distribution.sort_by(|a, b| a.total_cmp(b));
    assert_eq!(distribution, vec![100.0, 150.0]);
}

#[test]
fn full_run_joins_encodes_and_correlates() {
    let dir = tempfile::tempdir().unwrap();
    let gdp = "Sr.No,Country,1970,1971,1972\n\
               1,Aland,100,110,\n\
               2,Bora,200,220,240\n\
               3,Cato,300,330,360\n\
               4,Dune,400,440,480\n\
               5,Orphan,1,2,3\n";
    let development = format!(
        "{DEV_HEADER}\n\
         Aland,Europe,High income,Actual,Euro,General trade system,2011,\n\
         Bora,Asia,Low income,Actual,Yen,Special trade system,2010,\n\
         Cato,Europe,High income,,Euro,General trade system,2011,\n\
         Dune,Africa,Low income,Estimate,Rand,,2001,\n\
         Elsewhere,Asia,Low income,Actual,Yen,General trade system,2000,\n"
    );
    let config = write_fixture(dir.path(), gdp, &development);

    let run = AnalysisRun::execute(&config, Some("Cato")).expect("pipeline run");

    // 4 matched countries x 3 years; Orphan and Elsewhere drop out.
    assert_eq!(run.merged.height(), 12);
    assert_eq!(run.countries, vec!["Aland", "Bora", "Cato", "Dune", "Orphan"]);

    // Null labels take the sentinel.
    let debt: Vec<Option<i32>> = run
        .development
        .column("ExternalDebtReportingStatus")
        .unwrap()
        .i32()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(debt, vec![Some(0), Some(0), Some(-1), Some(1), Some(0)]);

    for series in &run.correlations {
        assert_eq!(series.points.len(), 3);
        for point in &series.points {
            if let Some(r) = point.correlation {
                assert!((0.0..=1.0).contains(&r), "{} {} = {}", series.indicator, point.year, r);
            }
        }
    }

    // IncomeGroup: High(0) for Aland/Cato, Low(1) for Bora/Dune.
    let income = run
        .correlations
        .iter()
        .find(|s| s.indicator == "IncomeGroup")
        .unwrap();
    let r1970 = income.points[0].correlation.unwrap();
    let expected = pearson_by_hand(&[100.0, 200.0, 300.0, 400.0], &[0.0, 1.0, 0.0, 1.0]).abs();
    assert!((r1970 - expected).abs() < 1e-9);

    assert_eq!(run.selected_country.as_deref(), Some("Cato"));
    assert_eq!(run.country_series.len(), 3);
    assert_eq!(run.distribution.len(), 14);
}

#[test]
fn stale_selection_falls_back_to_first_country() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(
        dir.path(),
        "Sr.No,Country,1970\n1,Aland,100\n2,Bora,200\n",
        &format!("{DEV_HEADER}\nAland,Europe,High income,Actual,Euro,General,2011,\n"),
    );
    let run = AnalysisRun::execute(&config, Some("Vanished")).unwrap();
    assert_eq!(run.selected_country.as_deref(), Some("Aland"));
}

#[test]
fn missing_input_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("gdp_per_capita.csv"), "Sr.No,Country,1970\n1,A,1\n").unwrap();
    let config = DashboardConfig {
        data_dir: dir.path().to_path_buf(),
        ..DashboardConfig::default()
    };
    assert!(matches!(
        AnalysisRun::execute(&config, None),
        Err(PipelineError::Loader(_))
    ));
}

#[test]
fn melt_preserves_cell_count_on_loaded_data() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(
        dir.path(),
        "Sr.No,Country,1970,1971,1972\n1,A,1,2,3\n2,B,4,,6\n",
        &format!("{DEV_HEADER}\n"),
    );
    let gdp = gdp_dashboard::data::DataLoader::load_csv(config.gdp_path()).unwrap();
    let long = DataProcessor::melt_years(&gdp, &config.id_columns).unwrap();
    assert_eq!(long.height(), gdp.height() * 3);
}

fn pearson_by_hand(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mx = x.iter().sum::<f64>() / n;
    let my = y.iter().sum::<f64>() / n;
    let cov: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    let vx: f64 = x.iter().map(|a| (a - mx).powi(2)).sum();
    let vy: f64 = y.iter().map(|b| (b - my).powi(2)).sum();
    cov / (vx.sqrt() * vy.sqrt())
}

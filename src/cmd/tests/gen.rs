use std::env::temp_dir;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use chrono::NaiveDate;
use cmd::command::gen;
use cmd::command::gen::Gen;
use cmd::config::Config;
use cmd::config::LogLevel;
use cmd::config::OutputFormat;
use cmd::error::Error;
use cmd::error::Result;
use facts_gen::output::Format;
use tracing::level_filters::LevelFilter;
use uuid::Uuid;

fn tmp_dir() -> Result<PathBuf> {
    let dir = temp_dir().join(format!("facts-cmd-{}", Uuid::new_v4()));
    fs::create_dir_all(&dir)?;

    Ok(dir)
}

fn write_titles(dir: &Path, n: usize) -> Result<PathBuf> {
    let mut csv = String::from("show_id,type,title,director,release_year,rating,listed_in\n");
    for i in 0..n {
        csv.push_str(&format!(
            "s{},Movie,Title {},,{},PG,\"Dramas, Comedies\"\n",
            i + 1,
            i + 1,
            1990 + i % 30
        ));
    }
    let path = dir.join("titles.csv");
    fs::write(&path, csv)?;

    Ok(path)
}

#[test]
fn test_defaults() -> Result<()> {
    let cfg = Config::load(None)?;

    assert_eq!(cfg.data.titles_path, PathBuf::from("../netflix_titles.csv"));
    assert_eq!(cfg.data.out_path, PathBuf::from("data/generated"));
    assert_eq!(cfg.period.from, "2023-01-01");
    assert_eq!(cfg.period.to, "2024-12-31");
    assert_eq!(cfg.generator.seed, 42);
    assert_eq!(cfg.generator.base_viewers, 45000);
    assert_eq!(cfg.generator.titles_per_segment, 60);
    assert_eq!(cfg.output.format, OutputFormat::Csv);
    assert_eq!(cfg.log.level, LogLevel::Info);

    Ok(())
}

#[test]
fn test_file_and_flags() -> Result<()> {
    let dir = tmp_dir()?;
    let path = dir.join("facts.toml");
    fs::write(
        &path,
        r#"
[period]
from = "2023-06-01"
to = "2023-06-30"

[generator]
seed = 7
base_viewers = 1000

[output]
format = "tsv"
"#,
    )?;

    let args = Gen {
        config: Some(path),
        to: Some("2023-06-02".to_string()),
        log_level: Some(LogLevel::Debug),
        ..Default::default()
    };
    let settings = args.settings()?;

    assert_eq!(
        settings.scenario.from,
        NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
    );
    assert_eq!(
        settings.scenario.to,
        NaiveDate::from_ymd_opt(2023, 6, 2).unwrap()
    );
    assert_eq!(settings.scenario.seed, 7);
    assert_eq!(settings.scenario.viewing.base_viewers, 1000);
    assert_eq!(settings.scenario.viewing.titles_per_segment, 60);
    assert_eq!(settings.format, Format::TSV);
    assert_eq!(settings.log_level, LevelFilter::DEBUG);

    fs::remove_dir_all(dir)?;

    Ok(())
}

#[test]
fn test_missing_config_file() {
    let args = Gen {
        config: Some(temp_dir().join(format!("{}.toml", Uuid::new_v4()))),
        ..Default::default()
    };
    assert!(matches!(args.settings(), Err(Error::FileNotFound(_))));
}

#[test]
fn test_bad_date() {
    let args = Gen {
        from: Some("someday".to_string()),
        ..Default::default()
    };
    assert!(args.settings().is_err());
}

#[test]
fn test_generate() -> Result<()> {
    let dir = tmp_dir()?;
    let titles = write_titles(&dir, 60)?;
    let out = dir.join("out");

    let args = Gen {
        titles_path: Some(titles),
        out_path: Some(out.clone()),
        from: Some("2023-01-01".to_string()),
        to: Some("2023-01-01".to_string()),
        ..Default::default()
    };
    let summary = gen::start(args.settings()?)?;

    assert_eq!(summary.dim_date.rows, 1);
    assert_eq!(summary.viewing.rows, 1200);
    assert_eq!(summary.subscriptions.rows, 5);
    assert!(out.join("DimDate.csv").exists());
    assert!(out.join("FactViewingDaily.csv").exists());
    assert!(out.join("FactSubscriptionsMonthly.csv").exists());

    fs::remove_dir_all(dir)?;

    Ok(())
}

#[test]
fn test_generate_without_titles() -> Result<()> {
    let dir = tmp_dir()?;
    let args = Gen {
        titles_path: Some(dir.join("missing.csv")),
        out_path: Some(dir.join("out")),
        ..Default::default()
    };

    assert!(matches!(
        gen::start(args.settings()?),
        Err(Error::FileNotFound(_))
    ));
    assert!(!dir.join("out").exists());

    fs::remove_dir_all(dir)?;

    Ok(())
}

#[test]
fn test_generate_with_small_catalog() -> Result<()> {
    let dir = tmp_dir()?;
    let titles = write_titles(&dir, 10)?;
    let args = Gen {
        titles_path: Some(titles),
        out_path: Some(dir.join("out")),
        from: Some("2023-01-01".to_string()),
        to: Some("2023-01-01".to_string()),
        ..Default::default()
    };

    assert!(matches!(
        gen::start(args.settings()?),
        Err(Error::FactsGen(_))
    ));

    fs::remove_dir_all(dir)?;

    Ok(())
}

#[test]
fn test_shipped_config() -> Result<()> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../etc/facts.toml");
    let cfg = Config::load(Some(&path))?;

    assert_eq!(cfg.generator.seed, 42);
    assert!(cfg.generator.progress);
    assert_eq!(cfg.output.format, OutputFormat::Csv);

    Ok(())
}

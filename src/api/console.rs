use super::infra::{compose_report, generated_at, send_high_risk_alert, AlertBackend};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::telemetry::{self, LogSink};
use crate::workflows::screening::{
    render_pdf, AlertMessage, AlertOutcome, HistogramBin, RiskEngine, RiskLevel, ScreeningRun,
    TierDistribution, DEFAULT_HISTOGRAM_BINS,
};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

const BAR_WIDTH: usize = 40;

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    /// Passenger dataset (CSV with header row)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print every scored passenger, not just the summary
    #[arg(long)]
    pub(crate) list: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Passenger dataset (CSV with header row)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Passenger to report on
    #[arg(long)]
    pub(crate) passenger_id: String,
    /// Directory for the PDF export (defaults to REPORT_OUTPUT_DIR)
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
    /// Only print the text preview
    #[arg(long)]
    pub(crate) no_pdf: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AlertArgs {
    /// Passenger dataset (CSV with header row)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print the alert instead of sending it
    #[arg(long)]
    pub(crate) dry_run: bool,
}

fn load(csv: &PathBuf) -> Result<(AppConfig, ScreeningRun), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogSink::Stderr)?;
    let run = ScreeningRun::from_path(csv, &RiskEngine::default())?;
    Ok((config, run))
}

pub(crate) fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let (_, run) = load(&args.csv)?;
    let batch = &run.batch;

    println!("Passenger screening");
    println!(
        "Rows: {} read, {} accepted, {} rejected",
        run.total_rows(),
        batch.len(),
        run.rejected.len()
    );
    for rejected in &run.rejected {
        println!("- line {}: {}", rejected.line, rejected.reason);
    }

    if args.list {
        println!("\nScored passengers");
        for passenger in batch.passengers() {
            let reasons = passenger.assessment.reasons();
            println!(
                "- {} | {} | {} | score {} | {} | {}",
                passenger.record.passenger_id,
                passenger.record.passenger_name,
                passenger.record.flight_no,
                passenger.assessment.score,
                passenger.assessment.level,
                if reasons.is_empty() {
                    "no risk factors".to_string()
                } else {
                    reasons.join(", ")
                }
            );
        }
    }

    println!("\nRisk level distribution");
    print!("{}", tier_chart(&batch.tier_distribution()));

    println!("\nRisk score histogram");
    print!("{}", histogram_chart(&batch.score_histogram(DEFAULT_HISTOGRAM_BINS)));

    let high_risk = batch.high_risk();
    if high_risk.is_empty() {
        println!("\nNo HIGH-risk passengers detected.");
    } else {
        println!("\n{} HIGH-RISK passengers detected:", high_risk.len());
        for passenger in high_risk {
            println!(
                "- {} ({}), flight {}, score {}",
                passenger.record.passenger_id,
                passenger.record.passenger_name,
                passenger.record.flight_no,
                passenger.assessment.score
            );
        }
    }

    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let (config, run) = load(&args.csv)?;
    let report = compose_report(&run, &args.passenger_id)?;

    println!("{}", report.to_text());

    if !args.no_pdf {
        let output_dir = args.output_dir.unwrap_or(config.reports.output_dir);
        std::fs::create_dir_all(&output_dir)?;
        let path = output_dir.join(report.file_name());
        std::fs::write(&path, render_pdf(&report)?)?;
        info!(path = %path.display(), "security report written");
        println!("\nPDF report: {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_alert(args: AlertArgs) -> Result<(), AppError> {
    let (config, run) = load(&args.csv)?;

    if args.dry_run {
        match AlertMessage::compose(&run.batch.high_risk(), generated_at()) {
            Some(message) => {
                println!("Subject: {}\n", message.subject);
                println!("{}", message.body);
            }
            None => println!("No HIGH-risk passengers detected; nothing to send."),
        }
        return Ok(());
    }

    let backend = AlertBackend::from_config(&config.alerts);
    match send_high_risk_alert(&run, &backend)? {
        AlertOutcome::NothingToSend => {
            println!("No HIGH-risk passengers detected; nothing to send.")
        }
        AlertOutcome::Sent { passengers } => {
            println!("High-risk alert sent for {passengers} passenger(s).")
        }
    }

    Ok(())
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let width = (count * BAR_WIDTH).div_ceil(max);
    "#".repeat(width)
}

pub(crate) fn tier_chart(distribution: &TierDistribution) -> String {
    let max = RiskLevel::ordered()
        .into_iter()
        .map(|level| distribution.count(level))
        .max()
        .unwrap_or(0);

    RiskLevel::ordered()
        .into_iter()
        .map(|level| {
            let count = distribution.count(level);
            format!("{:<6} | {} {}\n", level.label(), bar(count, max), count)
        })
        .collect()
}

pub(crate) fn histogram_chart(histogram: &[HistogramBin]) -> String {
    let max = histogram.iter().map(|bin| bin.count).max().unwrap_or(0);

    histogram
        .iter()
        .map(|bin| {
            format!(
                "{:>6.1} - {:>6.1} | {} {}\n",
                bin.lower,
                bin.upper,
                bar(bin.count, max),
                bin.count
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_chart_scales_bars_to_largest_tier() {
        let chart = tier_chart(&TierDistribution {
            low: 4,
            medium: 2,
            high: 0,
        });
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], format!("LOW    | {} 4", "#".repeat(BAR_WIDTH)));
        assert_eq!(lines[1], format!("MEDIUM | {} 2", "#".repeat(BAR_WIDTH / 2)));
        assert_eq!(lines[2], "HIGH   |  0");
    }

    #[test]
    fn histogram_chart_prints_one_row_per_bin() {
        let chart = histogram_chart(&[
            HistogramBin {
                lower: 0.0,
                upper: 10.0,
                count: 1,
            },
            HistogramBin {
                lower: 10.0,
                upper: 20.0,
                count: 0,
            },
        ]);
        assert_eq!(chart.lines().count(), 2);
        assert!(chart.starts_with("   0.0 -   10.0 | "));
    }
}

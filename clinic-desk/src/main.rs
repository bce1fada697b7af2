use std::path::PathBuf;

use anyhow::{Context, Result};
use billing_service::format_amount;
use chrono::{Datelike, Duration, NaiveDate};
use clap::{Parser, Subcommand};
use config_engine::ConfigLoader;
use logger_redacted::{init_tracing, LoggerConfig};
use notification_service::{Channel, SimulatedDispatcher};
use scheduling_service::{parse_date, ReminderStatus};
use tracing::{info, warn};

use clinic_desk::{seed, ClinicDesk};

/// ClinicDesk front-desk console
#[derive(Parser, Debug)]
#[command(name = "clinic-desk")]
#[command(about = "Appointments, billing and reminders for a single clinic")]
#[command(version)]
struct Args {
    /// Configuration file path (YAML, TOML or JSON)
    #[arg(short, long, env = "CLINIC_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Working day, YYYY-MM-DD
    #[arg(short, long, default_value = seed::SAMPLE_DAY)]
    date: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the day's appointments per doctor
    Schedule,
    /// List invoices with their payment status
    Billing,
    /// Revenue report for the month containing --date
    Report,
    /// Front-desk summary for the day
    Dashboard {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Send pending follow-up reminders due within the next few days
    Remind {
        #[arg(long, default_value = "7")]
        days: i64,
        #[arg(long, value_enum, default_value = "sms")]
        channel: ChannelArg,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ChannelArg {
    Sms,
    Whatsapp,
    Email,
}

impl From<ChannelArg> for Channel {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Sms => Channel::Sms,
            ChannelArg::Whatsapp => Channel::WhatsApp,
            ChannelArg::Email => Channel::Email,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_file(path);
    }
    let config = loader.load().context("failed to load configuration")?;

    init_tracing(&LoggerConfig {
        log_level: if args.verbose {
            "debug".to_string()
        } else {
            config.logging.level.clone()
        },
        json: config.logging.json,
    })?;

    let date = parse_date(&args.date)?;
    info!(version = env!("CARGO_PKG_VERSION"), %date, "starting clinic desk");

    let mut desk = seed::sample_desk(config).context("failed to load sample clinic")?;

    match args.command {
        Command::Schedule => print_schedule(&desk, date),
        Command::Billing => print_billing(&desk),
        Command::Report => print_report(&desk, date)?,
        Command::Dashboard { json } => {
            let stats = desk.dashboard(date);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{} on {}", desk.config().clinic_name, date);
                println!("  Appointments:      {}", stats.appointments);
                println!("  Checked in:        {}", stats.checked_in);
                println!("  Waiting:           {}", stats.waiting);
                println!("  Doctors available: {}", stats.doctors_available);
                println!("  Follow-ups due:    {}", stats.follow_ups_due);
                println!(
                    "  Pending payments:  {}",
                    format_amount(stats.pending_payments, desk.currency())
                );
            }
        }
        Command::Remind { days, channel } => {
            send_reminders(&mut desk, date, days, channel.into()).await?;
        }
    }

    Ok(())
}

fn print_schedule(desk: &ClinicDesk, date: NaiveDate) {
    let directory = desk.directory();
    for doctor in directory.doctors() {
        let status = if doctor.works_on(date) { "" } else { " (off)" };
        println!("{} - {}{}", doctor.name, doctor.specialty, status);

        let mut any = false;
        for appointment in desk.schedule().for_doctor(date, &doctor.id) {
            any = true;
            let patient = directory
                .patient(appointment.patient_id())
                .map_or(appointment.patient_id().as_str(), |p| p.name.as_str());
            let walk_in = if appointment.is_walk_in() { " [walk-in]" } else { "" };
            println!(
                "  {}  {:<10} {:<18} {}{}",
                appointment.time().format("%H:%M"),
                appointment.status(),
                patient,
                appointment.visit_type(),
                walk_in,
            );
        }
        if !any {
            println!("  no appointments");
        }
    }

    let waiting: Vec<_> = desk.queue().waiting(date).collect();
    if !waiting.is_empty() {
        println!();
        println!("Waiting room");
        for entry in waiting {
            let wait = desk.estimated_wait(date, &entry.token).unwrap_or(0);
            println!(
                "  {}  {}  checked in {}  ~{} min",
                entry.token,
                entry.patient_id,
                entry.checked_in_at.format("%H:%M"),
                wait
            );
        }
    }
}

fn print_billing(desk: &ClinicDesk) {
    let currency = desk.currency();
    for invoice in desk.billing().all() {
        let patient = desk
            .directory()
            .patient(invoice.patient_id())
            .map_or(invoice.patient_id().as_str(), |p| p.name.as_str());
        println!(
            "{}  {}  {:<18} {:>12} paid {:>12}  {}",
            invoice.invoice_number(),
            invoice.issue_date(),
            patient,
            format_amount(invoice.total(), currency),
            format_amount(invoice.amount_paid(), currency),
            invoice.status(),
        );
    }
    println!(
        "Outstanding: {}",
        format_amount(desk.billing().total_outstanding(), currency)
    );
}

fn print_report(desk: &ClinicDesk, date: NaiveDate) -> Result<()> {
    let start = date.with_day(1).context("invalid month start")?;
    let next_month = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    }
    .context("invalid month end")?;
    let end = next_month.pred_opt().context("invalid month end")?;

    let report = desk.revenue_report(start, end);
    let currency = desk.currency();

    println!("Revenue {} to {}", report.period_start, report.period_end);
    println!("  Invoices:     {}", report.invoice_count);
    println!("  Billed:       {}", format_amount(report.total_billed, currency));
    println!("  Collected:    {}", format_amount(report.collections, currency));
    println!("  Outstanding:  {}", format_amount(report.outstanding, currency));
    println!(
        "  Paid / partial / pending: {} / {} / {}",
        report.paid_count, report.partially_paid_count, report.pending_count
    );
    println!("By service");
    for service in &report.by_service {
        println!(
            "  {:<36} x{:<3} {}",
            service.name,
            service.quantity,
            format_amount(service.total_charges, currency)
        );
    }
    Ok(())
}

async fn send_reminders(
    desk: &mut ClinicDesk,
    date: NaiveDate,
    days: i64,
    channel: Channel,
) -> Result<()> {
    let horizon = date + Duration::days(days);
    let pending: Vec<_> = desk
        .follow_ups()
        .due_by(horizon)
        .filter(|f| f.reminder_status == ReminderStatus::Pending)
        .map(|f| f.id)
        .collect();

    let dispatcher = SimulatedDispatcher::new();
    for id in pending {
        match desk.send_follow_up_reminder(&dispatcher, id, channel).await {
            Ok(receipt) => println!("sent {} reminder {}", receipt.channel, receipt.id),
            Err(e) => warn!(follow_up_id = %id, error = %e, "reminder not sent"),
        }
    }

    println!("{} reminder(s) dispatched", dispatcher.sent().await.len());
    Ok(())
}

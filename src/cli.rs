use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;

use almanac::{
    CalendarDay, Locale, LocaleConfig, LocaleOptions, Masks, MonthComponents, NameLength,
    NormalizeOptions, Page, PageInput,
};

/// Multi-calendar date engine.
#[derive(Parser)]
#[command(
    name = "almanac",
    version,
    about = "Locale-aware date formatting, parsing, and month grids"
)]
pub struct Cli {
    /// Locale identifier (BCP-47); detected from the environment when absent.
    #[arg(short, long, global = true)]
    pub locale: Option<String>,

    /// Calendar system (gregory, buddhist, hebrew, islamic-umalqura, ...).
    #[arg(short, long, global = true)]
    pub calendar: Option<String>,

    /// IANA timezone name, or "utc"; defaults to the system zone.
    #[arg(short, long, global = true)]
    pub timezone: Option<String>,

    /// First day of the week, 1 = Sunday through 7 = Saturday.
    #[arg(long = "first-day", global = true, value_parser = clap::value_parser!(u32).range(1..=7))]
    pub first_day: Option<u32>,

    /// Locale configuration JSON file; the flags above override its fields.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit JSON instead of plain text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Format a date through a mask.
    Format(FormatArgs),
    /// Parse text against one or more masks.
    Parse(ParseArgs),
    /// Dump the month grid for a page.
    Grid(GridArgs),
    /// Report the resolved locale settings.
    Info,
}

/// Arguments for the `format` subcommand.
#[derive(clap::Args)]
pub struct FormatArgs {
    /// Date to format: ISO text, epoch milliseconds, or "now".
    pub date: String,

    /// Mask to render through; "L" expands to the locale's regional mask.
    #[arg(short, long, default_value = "L")]
    pub mask: String,
}

/// Arguments for the `parse` subcommand.
#[derive(clap::Args)]
pub struct ParseArgs {
    /// Text to parse.
    pub text: String,

    /// Masks to try in order; the first token match wins.
    #[arg(short, long = "mask", default_value = "L")]
    pub masks: Vec<String>,
}

/// Arguments for the `grid` subcommand.
#[derive(clap::Args)]
pub struct GridArgs {
    /// Month number in the active calendar.
    #[arg(short, long, requires = "year")]
    pub month: Option<u32>,

    /// Year in the active calendar.
    #[arg(short, long, requires = "month")]
    pub year: Option<i32>,

    /// Date whose page to show.
    #[arg(short, long, conflicts_with_all = ["month", "year"])]
    pub date: Option<String>,

    /// Page offset from this month.
    #[arg(short, long, default_value_t = 0, conflicts_with_all = ["month", "year", "date"])]
    pub offset: i32,
}

pub fn run(cli: Cli) -> Result<()> {
    let locale = build_locale(&cli)?;
    match &cli.command {
        Command::Format(args) => run_format(&locale, args, cli.json),
        Command::Parse(args) => run_parse(&locale, args, cli.json),
        Command::Grid(args) => run_grid(&locale, args, cli.json),
        Command::Info => run_info(&locale, cli.json),
    }
}

fn build_locale(cli: &Cli) -> Result<Locale> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<LocaleConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => LocaleConfig::default(),
    };
    if let Some(locale) = &cli.locale {
        config.id = Some(locale.clone());
    }
    if let Some(calendar) = &cli.calendar {
        config.calendar = Some(calendar.clone());
    }
    if let Some(first_day) = cli.first_day {
        config.first_day_of_week = Some(first_day);
    }
    Ok(Locale::new(
        config,
        LocaleOptions {
            timezone: cli.timezone.clone(),
            ..LocaleOptions::default()
        },
    ))
}

fn resolve_date(locale: &Locale, raw: &str) -> Result<DateTime<Utc>> {
    if raw == "now" {
        return Ok(Utc::now());
    }
    if let Ok(timestamp) = raw.parse::<i64>() {
        return locale
            .normalize_date(timestamp, NormalizeOptions::default())
            .context("timestamp out of range");
    }
    locale
        .normalize_date(raw, NormalizeOptions::default())
        .with_context(|| format!("cannot interpret {raw:?} as a date"))
}

fn run_format(locale: &Locale, args: &FormatArgs, json: bool) -> Result<()> {
    let instant = resolve_date(locale, &args.date)?;
    let text = locale.format(instant, &args.mask);
    if json {
        print_json(&serde_json::json!({
            "instant": instant,
            "mask": args.mask,
            "text": text,
        }))
    } else {
        println!("{text}");
        Ok(())
    }
}

fn run_parse(locale: &Locale, args: &ParseArgs, json: bool) -> Result<()> {
    let masks: Vec<&str> = args.masks.iter().map(String::as_str).collect();
    let Some(instant) = locale.parse(&args.text, &masks) else {
        bail!("no mask matched {:?}", args.text);
    };
    if json {
        print_json(&serde_json::json!({
            "text": args.text,
            "instant": instant,
            "timestamp": instant.timestamp_millis(),
            "iso": locale.format(instant, "iso"),
        }))
    } else {
        println!("{}", locale.format(instant, "iso"));
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GridReport<'a> {
    page: Page,
    components: &'a MonthComponents,
    days: &'a [CalendarDay],
}

fn run_grid(locale: &Locale, args: &GridArgs, json: bool) -> Result<()> {
    let page = resolve_page(locale, args)?;
    if !locale.page_is_valid(page) {
        bail!(
            "page {}/{} is outside calendar {}",
            page.month,
            page.year,
            locale.calendar().as_str()
        );
    }
    let comps = locale
        .month_components(page.month, page.year)
        .with_context(|| format!("cannot decompose {}/{}", page.month, page.year))?;
    let days = locale
        .calendar_days(page)
        .with_context(|| format!("cannot build the grid for {}/{}", page.month, page.year))?;
    if json {
        return print_json(&GridReport {
            page,
            components: &comps,
            days: &days,
        });
    }

    let title = locale
        .month_label(page.year, page.month, true)
        .unwrap_or_default();
    println!("{title} {} ({})", page.year, locale.calendar().as_str());
    let names = locale.day_names(NameLength::Shorter);
    println!("{}", names.iter().map(|n| format!("{n:>4}")).collect::<String>());
    for row in days.chunks(7) {
        let line: String = row
            .iter()
            .map(|cell| {
                if cell.in_current_month {
                    format!("{:>4}", cell.label)
                } else {
                    format!("{:>4}", "-")
                }
            })
            .collect();
        println!("{line}");
    }
    Ok(())
}

fn resolve_page(locale: &Locale, args: &GridArgs) -> Result<Page> {
    let input = if let (Some(month), Some(year)) = (args.month, args.year) {
        PageInput::Page(Page { month, year })
    } else if let Some(date) = &args.date {
        PageInput::from(date.as_str())
    } else {
        PageInput::Offset(args.offset)
    };
    locale
        .to_page(input, None)
        .context("cannot resolve the requested page")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocaleReport<'a> {
    id: &'a str,
    calendar: &'a str,
    direction: &'a str,
    first_day_of_week: u32,
    masks: &'a Masks,
    am_pm: &'a [String; 2],
    timezone: String,
    day_names: &'a [String; 7],
    day_names_short: &'a [String; 7],
    month_names: &'a [String],
}

fn run_info(locale: &Locale, json: bool) -> Result<()> {
    if json {
        return print_json(&LocaleReport {
            id: locale.id(),
            calendar: locale.calendar().as_str(),
            direction: locale.direction().as_str(),
            first_day_of_week: locale.first_day_of_week(),
            masks: locale.masks(),
            am_pm: locale.am_pm(),
            timezone: locale.timezone_name(),
            day_names: locale.day_names(NameLength::Long),
            day_names_short: locale.day_names(NameLength::Short),
            month_names: locale.month_names(),
        });
    }
    println!("locale       {}", locale.id());
    println!("calendar     {}", locale.calendar().as_str());
    println!("direction    {}", locale.direction());
    println!("first day    {}", locale.first_day_of_week());
    println!("mask L       {}", locale.masks().l);
    println!("mask iso     {}", locale.masks().iso);
    println!("am/pm        {} {}", locale.am_pm()[0], locale.am_pm()[1]);
    println!("timezone     {}", locale.timezone_name());
    println!(
        "day names    {}",
        locale.day_names(NameLength::Long).join(", ")
    );
    println!("month names  {}", locale.month_names().join(", "));
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

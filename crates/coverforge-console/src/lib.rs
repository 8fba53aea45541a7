//! Colorful console output for solver events.
//!
//! Provides a custom `tracing` layer that formats solver events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solving/phase start/end)
//! - **DEBUG**: Sampling region, greedy picks, substitutions (not rendered)

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "coverforge_solver=info";

/// Initializes the solver console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the CoverForge banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(CoverConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since solve start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
  ╔═╗┌─┐┬  ┬┌─┐┬─┐╔═╗┌─┐┬─┐┌─┐┌─┐
  ║  │ │└┐┌┘├┤ ├┬┘╠╣ │ │├┬┘│ ┬├┤
  ╚═╝└─┘ └┘ └─┘┴└─╚  └─┘┴└─└─┘└─┘
"#;

    let version_line = format!("  v{} - Maximum Covering Location Heuristic\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct CoverConsoleLayer;

impl<S: Subscriber> Layer<S> for CoverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();

        // Accept events from solver modules
        if !target.starts_with("coverforge_solver") && !target.starts_with("coverforge::") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    phase: Option<String>,
    phase_index: Option<u64>,
    steps: Option<u64>,
    duration_ms: Option<u64>,
    moves_speed: Option<u64>,
    objective: Option<u64>,
    constructive_objective: Option<u64>,
    covered_demand: Option<u64>,
    improved: Option<bool>,
    demand_count: Option<u64>,
    candidate_count: Option<u64>,
    target_count: Option<u64>,
    radius: Option<f64>,
    cells: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "phase" => self.phase = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "phase_index" => self.phase_index = Some(value),
            "steps" => self.steps = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "moves_speed" => self.moves_speed = Some(value),
            "objective" => self.objective = Some(value),
            "constructive_objective" => self.constructive_objective = Some(value),
            "covered_demand" => self.covered_demand = Some(value),
            "demand_count" => self.demand_count = Some(value),
            "candidate_count" => self.candidate_count = Some(value),
            "target_count" => self.target_count = Some(value),
            "cells" => self.cells = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "radius" {
            self.radius = Some(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "improved" {
            self.improved = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "phase" => self.phase = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "phase_start" => format_phase_start(v),
        "phase_end" => format_phase_end(v),
        "experiment_start" => format_experiment_start(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let demand = v.demand_count.unwrap_or(0);
    let candidates = v.candidate_count.unwrap_or(0);
    let target = v.target_count.unwrap_or(0);
    let radius = v.radius.unwrap_or(0.0);
    let scale = calculate_problem_scale(candidates, target);

    format!(
        "{} {} Solving │ {} demand │ {} candidates │ pick {} │ radius {} │ scale {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        demand.to_formatted_string(&Locale::en).bright_yellow(),
        candidates.to_formatted_string(&Locale::en).bright_yellow(),
        target.to_formatted_string(&Locale::en).bright_yellow(),
        radius.bright_yellow(),
        scale.bright_magenta()
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let objective = v.objective.unwrap_or(0);
    let constructive = v.constructive_objective.unwrap_or(objective);
    let improved = v.improved.unwrap_or(objective > constructive);

    let status = if improved {
        "IMPROVED".bright_green().bold().to_string()
    } else {
        "CONSTRUCTIVE".white().bold().to_string()
    };

    let mut output = format!(
        "{} {} Solving complete │ objective {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_objective(objective),
        status
    );

    // Summary box
    output.push_str("\n\n");
    output.push_str(&BOX_TOP.bright_cyan().to_string());
    output.push('\n');
    output.push_str(&summary_line("Constructive:", constructive));
    output.push_str(&summary_line("Final objective:", objective));
    if let Some(covered) = v.covered_demand {
        output.push_str(&summary_line("Covered demand:", covered));
    }
    if let Some(ms) = v.duration_ms {
        output.push_str(&format!(
            "{}  {:<18}{:>36}  {}\n",
            "║".bright_cyan(),
            "Time:",
            format_duration_ms(ms),
            "║".bright_cyan()
        ));
    }
    output.push_str(&BOX_BOTTOM.bright_cyan().to_string());
    output.push('\n');

    output
}

const BOX_TOP: &str = "╔══════════════════════════════════════════════════════════╗";
const BOX_BOTTOM: &str = "╚══════════════════════════════════════════════════════════╝";

fn summary_line(label: &str, value: u64) -> String {
    format!(
        "{}  {:<18}{:>36}  {}\n",
        "║".bright_cyan(),
        label,
        value.to_formatted_string(&Locale::en),
        "║".bright_cyan()
    )
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");

    let index = v.phase_index.unwrap_or(0);

    format!(
        "{} {} {} {} started",
        format_elapsed(),
        "▶".bright_blue(),
        phase.white().bold(),
        format!("#{}", index).bright_black()
    )
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let steps = v.steps.unwrap_or(0);
    let moves_speed = v.moves_speed.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);

    let mut output = format!(
        "{} {} {} ended │ {} │ {} steps",
        format_elapsed(),
        "◀".bright_blue(),
        phase.white().bold(),
        format_duration_ms(duration).yellow(),
        steps.to_formatted_string(&Locale::en).white(),
    );

    if moves_speed > 0 {
        output.push_str(&format!(
            " │ {} moves/s",
            moves_speed
                .to_formatted_string(&Locale::en)
                .bright_magenta()
                .bold()
        ));
    }

    if let Some(objective) = v.objective {
        output.push_str(&format!(" │ objective {}", format_objective(objective)));
    }

    output
}

fn format_experiment_start(v: &EventVisitor) -> String {
    mark_solve_start();
    format!(
        "{} {} Experiment │ {} cells │ {} demand │ {} candidates",
        format_elapsed(),
        "▶".bright_green().bold(),
        v.cells
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_yellow(),
        v.demand_count
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_yellow(),
        v.candidate_count
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_yellow(),
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_objective(objective: u64) -> String {
    let s = objective.to_formatted_string(&Locale::en);
    if objective > 0 {
        s.bright_green().to_string()
    } else {
        s.white().to_string()
    }
}

// Number of ways to pick `target_count` of `candidate_count` sites.
fn calculate_problem_scale(candidate_count: u64, target_count: u64) -> String {
    if target_count == 0 || target_count > candidate_count {
        return "1".to_string();
    }

    let k = target_count.min(candidate_count - target_count);
    let log_scale: f64 = (0..k)
        .map(|i| ((candidate_count - i) as f64).log10() - ((i + 1) as f64).log10())
        .sum();
    let exponent = log_scale.floor() as i32;
    let mantissa = 10f64.powf(log_scale - exponent as f64);

    format!("{:.3} x 10^{}", mantissa, exponent)
}

use anyhow::{Context, Result, anyhow, bail};
use cancelkit_core::buttons::{DialogAction, DialogButton};
use cancelkit_core::config::{CancelkitConfig, StaticExperiments, load_config, resolve_config_path};
use cancelkit_core::eligibility::compute_final_step;
use cancelkit_core::purchase::{PlanTier, ProductKind, Purchase};
use comfy_table::{Cell, ContentArrangement, Table};

use crate::cli::{Cli, Command, GateArgs, WalkArgs};
use crate::scenario::{WalkReport, load_scenario, walk};

pub fn run_with_deps(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Config => run_config_command(),
        Command::Gate(args) => run_gate_command(&args),
        Command::Walk(args) => run_walk_command(&args),
    }
}

fn run_config_command() -> Result<()> {
    let config_path = resolve_config_path().context("failed to resolve config path")?;

    if !config_path.exists() {
        bail!(
            "missing config at {}\nCreate ~/.config/cancelkit/config.toml with `version = 1` to set feature flags and experiment buckets.",
            config_path.display()
        );
    }

    let config = load_config(&config_path).map_err(|error| {
        anyhow!(
            "invalid config at {}: {error}\nFix the config and retry.",
            config_path.display()
        )
    })?;

    println!("config: {}", config_path.display());
    print_config(&config);
    Ok(())
}

fn print_config(config: &CancelkitConfig) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Setting", "Value"]);

    table.add_row(vec![
        Cell::new("features.removal_survey"),
        Cell::new(on_off(config.features.removal_survey)),
    ]);
    table.add_row(vec![
        Cell::new("features.precancellation_chat"),
        Cell::new(on_off(config.features.precancellation_chat)),
    ]);

    let experiments = StaticExperiments::from_config(config);
    for (name, variant) in experiments.assignments() {
        table.add_row(vec![
            Cell::new(format!("experiments.{name}")),
            Cell::new(variant),
        ]);
    }

    println!("{table}");
}

fn on_off(value: bool) -> &'static str {
    if value { "enabled" } else { "disabled" }
}

fn run_gate_command(args: &GateArgs) -> Result<()> {
    let purchase = Purchase {
        id: 0,
        product_slug: String::new(),
        product_name: String::new(),
        kind: ProductKind::Plan,
        tier: if args.business {
            PlanTier::Business
        } else {
            PlanTier::Standard
        },
        included_domain: None,
        removable: true,
        subscribed_at: None,
        error: None,
    };

    let final_step = compute_final_step(
        Some(&purchase),
        args.first_answer.as_deref(),
        args.variant.as_deref(),
    );
    println!("survey steps: {}", final_step.as_step());
    Ok(())
}

fn run_walk_command(args: &WalkArgs) -> Result<()> {
    let scenario = load_scenario(&args.scenario)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let report = runtime.block_on(walk(scenario))?;
    print_walk_report(&report);
    Ok(())
}

fn print_walk_report(report: &WalkReport) {
    println!("removing {} from {}", report.product_name, report.site_domain);

    let mut steps = Table::new();
    steps.set_content_arrangement(ContentArrangement::Dynamic);
    steps.set_header(vec!["#", "Action", "Outcome", "Step", "Dialog", "Buttons"]);
    for (index, row) in report.rows.iter().enumerate() {
        let dialog = match (row.dialog_visible, row.removing) {
            (_, true) => "removing",
            (true, false) => "visible",
            (false, false) => "hidden",
        };
        steps.add_row(vec![
            Cell::new(index + 1),
            Cell::new(row.action.as_str()),
            Cell::new(row.outcome.as_str()),
            Cell::new(format!("{}/{}", row.current_step, row.final_step)),
            Cell::new(dialog),
            Cell::new(button_summary(&row.buttons)),
        ]);
    }
    println!("{steps}");

    let mut host = Table::new();
    host.set_content_arrangement(ContentArrangement::Dynamic);
    host.set_header(vec!["Collaborator", "Detail"]);
    for entry in &report.host_log {
        host.add_row(vec![Cell::new(entry.channel), Cell::new(entry.detail.as_str())]);
    }
    println!("{host}");

    let mut events = Table::new();
    events.set_content_arrangement(ContentArrangement::Dynamic);
    events.set_header(vec!["Event", "Properties"]);
    for event in &report.events {
        events.add_row(vec![
            Cell::new(event.name.as_str()),
            Cell::new(serde_json::Value::Object(event.properties.clone())),
        ]);
    }
    println!("{events}");
}

fn button_summary(buttons: &[DialogButton]) -> String {
    buttons
        .iter()
        .map(|button| {
            let name = match button.action {
                DialogAction::Chat => "chat",
                DialogAction::Cancel => "cancel",
                DialogAction::Previous => "previous",
                DialogAction::Next => "next",
                DialogAction::Remove => "remove",
            };
            let mut label = name.to_string();
            if button.primary {
                label.push('*');
            }
            if button.disabled {
                label.push_str(" (off)");
            }
            label
        })
        .collect::<Vec<_>>()
        .join(", ")
}

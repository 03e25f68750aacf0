use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use helpdesk::agent::Agent;
use helpdesk::system::SupportSystem;
use helpdesk::ticket::Status;

#[derive(Parser)]
#[command(name = "helpdesk")]
#[command(about = "Demo run of the in-memory support-ticket registry")]
struct Args {
    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the performance report as JSON when the run finishes
    #[arg(long)]
    report: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut system = SupportSystem::new();

    system.add_agent(
        Agent::builder()
            .name("Joan")
            .email("joan@example.com")
            .specialization("high")
            .build()?,
    );
    system.add_agent(
        Agent::builder()
            .name("Mary")
            .email("mary@example.com")
            .specialization("critical")
            .build()?,
    );

    let customer_id = system.register_customer("Dana", "dana@example.com").id;
    let ticket_id = system
        .open_ticket(
            customer_id,
            "System down",
            "The system is offline, this is urgent!",
        )?
        .id;

    let assignee = system
        .ticket(ticket_id)
        .and_then(|t| t.assigned_agent_id)
        .and_then(|agent_id| system.agent(agent_id));
    match assignee {
        Some(agent) => println!("Ticket assigned to: {}", agent.name),
        None => println!("No agent available"),
    }

    for response in system.process_message(ticket_id, customer_id, "Is anyone looking at this?")? {
        println!("auto-response: {response}");
    }

    system.update_ticket_status(ticket_id, Status::Resolved);
    system.rate_satisfaction(ticket_id, 5, Some("fast turnaround"))?;
    info!(ticket = %ticket_id, "demo ticket resolved");

    if args.report {
        let report = system.performance_report();
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

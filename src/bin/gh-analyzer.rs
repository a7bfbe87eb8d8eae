//! GitHub repository analyzer binary.
//!
//! Always exits successfully; every recovered failure is printed in the
//! trailing "System notifications" block.

use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use gh_analyzer::cli::{Cli, Config};
use gh_analyzer::output::{
    render_contributors, render_notifications, render_repositories, render_table,
};
use gh_analyzer::{selfcheck, Analyzer, GithubClient, Notifications, PrettyPrint};
use tracing::Level;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Covers --help and --version as well as usage errors. Logging is
            // not set up yet and the exit status stays 0, so a failed write of
            // the usage text is dropped.
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let mut notes = Notifications::new();
    let config = Config::from_cli(cli, Utc::now(), &mut notes);

    tracing::debug!(?config, "starting");
    run(&config, &mut notes).await;

    if let Some(block) = render_notifications(&notes) {
        println!("{block}");
    }
    ExitCode::SUCCESS
}

async fn run(config: &Config, notes: &mut Notifications) {
    if config.self_check {
        let outcomes = selfcheck::run();
        for failed in outcomes.iter().filter(|o| !o.passed) {
            notes.push(format!("Self-check failed: {}", failed.name));
        }
        println!(
            "{}",
            render_table("Self-check", outcomes.iter().map(|o| (o.name, o.status())))
        );
    }

    if !config.has_target() {
        if !config.self_check {
            notes.push("Nothing to analyze: pass --org or --url");
        }
        return;
    }

    let client = match GithubClient::new(&config.api_url) {
        Ok(client) => client,
        Err(e) => {
            notes.record(&e);
            return;
        }
    };
    let analyzer = Analyzer::new(client);

    if let Some(org) = &config.org {
        let repos = analyzer.organization_repositories(org, notes).await;
        println!("{}", render_repositories(org, &repos));
    }

    let Some(url) = &config.url else {
        return;
    };

    if let Some(branch) = &config.branch {
        tracing::debug!(%branch, "branch filter is not applied");
    }

    if config.contributors_only {
        if let Some((identity, contributors)) = analyzer.contributors(url, notes).await {
            println!("{}", render_contributors(&identity.full_name(), &contributors));
        }
        return;
    }

    // Rejected dates were already recorded while building the config
    let Some(window) = config.window else {
        return;
    };

    if let Some(report) = analyzer.analyze(url, window, notes).await {
        println!("{}", report.pretty_print());
    }
}

use anyhow::Context;
use log::info;
use mail_archiver::args::Args;
use mail_archiver::{credentials, organize, session};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    do_main(&Args::parse_args())
}

fn do_main(args: &Args) -> anyhow::Result<()> {
    let password = credentials::obtain_password().context("Cannot obtain a password")?;
    let mut session = session::connect(&args.host, &args.username, &password)?;

    let today = chrono::Local::now().date_naive();
    let summary = organize::run(&mut session, &args.folder, today, args.quiet)?;
    info!(
        "archived {} of {} eligible messages",
        summary.moved, summary.eligible
    );

    Ok(())
}

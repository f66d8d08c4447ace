#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	anyhow::Context,
	std::{path::Path, process::ExitCode},
	wplace_map_generator::{
		config::{Config, CONFIG_PATH},
		pipeline,
	},
};

fn main() -> ExitCode {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	match run() {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			log::error!("{err:#}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> anyhow::Result<()> {
	let config = Config::loadOrDefault(Path::new(CONFIG_PATH));
	let summary = pipeline::run(&config).context("generating map")?;
	log::info!(
		"{}x{} map, {} records painted, {} countries, {} malformed and {} overflowing records skipped",
		summary.width,
		summary.height,
		summary.stats.records,
		summary.countries,
		summary.stats.malformed,
		summary.stats.overflowing,
	);
	Ok(())
}

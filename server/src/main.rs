use std::env;
use std::path::PathBuf;

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "formilo=debug,info".into()),
		)
		.init();

	let config_path =
		PathBuf::from(env::var("FORMILO_CONFIG").unwrap_or("./formilo.yaml".to_string()));

	let config = match formilo::AppConfig::load(&config_path) {
		Ok(config) => config,
		Err(err) => {
			tracing::error!("Failed to load configuration from {}: {}", config_path.display(), err);
			std::process::exit(1);
		}
	};

	if let Err(err) = formilo::run(config).await {
		tracing::error!("Server terminated: {}", err);
		std::process::exit(1);
	}
}

// vim: ts=4

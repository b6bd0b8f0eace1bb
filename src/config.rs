use anyhow::{Context, Result};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MODEL_PATH: &str = "lgbr_cars.onnx";

/// Server settings, read from `HOST`, `PORT`, `WORKERS` and `MODEL_PATH`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub model_path: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match var("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT must be a port number, got {:?}", port))?,
            None => DEFAULT_PORT,
        };

        let workers = match var("WORKERS") {
            Some(workers) => workers
                .parse()
                .with_context(|| format!("WORKERS must be a positive integer, got {:?}", workers))?,
            None => num_cpus::get(),
        };
        if workers == 0 {
            anyhow::bail!("WORKERS must be at least 1");
        }

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            workers,
            model_path: var("MODEL_PATH").unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string()),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

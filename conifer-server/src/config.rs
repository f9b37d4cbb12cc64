use clap::Parser;

/// Server configuration, taken from flags or environment.
#[derive(Parser, Debug)]
#[command(name = "conifer-server", about = "Pinecone-compatible vector index mock")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0", env = "CONIFER_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8080, env = "CONIFER_PORT")]
    pub port: u16,

    /// Host string advertised in index descriptors. Defaults to
    /// `http://localhost:{port}`.
    #[arg(long, env = "CONIFER_ADVERTISED_HOST")]
    pub advertised_host: Option<String>,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn advertised_host(&self) -> String {
        self.advertised_host
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[clap(name = "barbell server")]
pub struct Cli {
    #[clap(long, env, default_value = "barbell.sqlite")]
    pub sqlite_connection_string: String,
    #[clap(long, env, default_value = "8080")]
    pub port: u16,
    #[clap(long, env, default_value = "127.0.0.1")]
    pub bind_addr: String,
    /// Work factor used when hashing passwords
    #[arg(long, env, default_value = "12")]
    pub bcrypt_cost: u32,
    #[arg(long, env, default_value = "http://localhost:8080")]
    pub cors_origin: String,
}

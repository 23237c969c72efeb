use crate::config::Config;
use crate::error::Result;
use crate::github::GithubClient;

pub struct ServerState {
    pub config: Config,
    pub github: GithubClient,
}

impl ServerState {
    pub fn new(config: Config) -> Result<Self> {
        let github = GithubClient::new(&config.github)?;
        Ok(Self { config, github })
    }
}

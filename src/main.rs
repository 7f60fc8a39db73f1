/*

Copyright 2025 croupier contributors

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.

*/

use croupier::settings::Settings;
use croupier::{bot, env};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), bot::Error> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("croupier=info")),
        )
        .init();

    let token = env::discord_token()?;
    let owners = env::owner_ids()?;
    let intents = bot::gateway_intents();
    let settings = Settings::load().map_err(|err| -> bot::Error { Box::new(err) })?;

    let framework = bot::build_framework(bot::prefix_options(), settings, owners);
    bot::run_client(token, intents, framework).await
}

use crate::action::Action;
use crate::domain::github::EventsClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchEvents { owner: String, repo: String },
}

pub async fn execute_command(command: Command, client: &EventsClient) -> Option<Action> {
    match command {
        Command::FetchEvents { owner, repo } => {
            let result = client.fetch_events(&owner, &repo).await;
            Some(Action::EventsLoaded(result))
        }
    }
}

use crate::api::Transport;
use crate::app::App;
use crate::commands::{builtin, Command, CommandResult};
use crate::config::RestavoConfig;
use crate::error::Result;
use crate::ui::UI;
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

pub struct Repl<T: Transport> {
    pub(crate) app: App<T>,
    pub(crate) config: RestavoConfig,
}

impl<T: Transport> Repl<T> {
    pub fn new(app: App<T>, config: RestavoConfig) -> Self {
        Self { app, config }
    }

    /// Reconcile the session, load favorites, then show the default search.
    pub async fn startup(&mut self) {
        self.app.check_status().await;
        if let Err(e) = self.app.refresh_favorites().await {
            tracing::warn!(error = %e, "Favorites could not be loaded at startup");
        }
        if let Some(user) = self.app.session().user() {
            UI::print_status(Some(user));
        }
        self.render_events();

        let city = self.config.default_city.clone();
        if let Err(e) = builtin::search_command(self, &city, None) {
            UI::print_error_with_hint(&e);
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        UI::print_welcome(&self.config.base_url);
        self.startup().await;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("{} ", "λ>".bright_green().bold());
            std::io::stdout().flush()?;

            match lines.next_line().await {
                Ok(Some(line)) => {
                    let result = self.process_line(&line).await;
                    if let Err(ref e) = result {
                        UI::print_error_with_hint(e);
                    }
                    self.render_events();

                    if let Ok(CommandResult::Exit) = result {
                        break;
                    }
                    println!();
                }
                Ok(None) => {
                    println!("\nExiting...");
                    UI::print_goodbye();
                    break;
                }
                Err(err) => {
                    UI::print_error(&err.to_string());
                    break;
                }
            }
        }

        Ok(())
    }

    /// Slash commands run as commands; anything else goes to the assistant.
    pub async fn process_line(&mut self, line: &str) -> Result<CommandResult> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(CommandResult::Continue);
        }

        match Command::parse(line)? {
            Some(command) => command.execute(self).await,
            None => {
                self.process_message(line).await?;
                Ok(CommandResult::Continue)
            }
        }
    }

    async fn process_message(&mut self, text: &str) -> Result<()> {
        UI::print_waiting("Awaiting response...");
        let entry = self.app.send_chat(text).await?;
        UI::print_chat_entry(entry);
        Ok(())
    }

    pub async fn process_single_prompt(&mut self, prompt: &str) -> Result<()> {
        println!("{} {}", "λ>".bright_green().bold(), prompt);
        println!();
        let result = self.process_message(prompt).await;
        self.render_events();
        result
    }

    pub async fn process_single_search(&mut self, city: &str) -> Result<()> {
        self.app.check_status().await;
        if let Err(e) = self.app.refresh_favorites().await {
            tracing::warn!(error = %e, "Favorites could not be loaded");
        }
        builtin::search_command(self, city, None)?;
        Ok(())
    }

    pub(crate) fn render_events(&mut self) {
        for event in self.app.drain_events() {
            UI::print_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockReply;
    use crate::app::testing::{has_signal, mock_app, transport};
    use crate::app::UiSignal;
    use crate::error::RestavoError;
    use serde_json::json;

    fn repl() -> Repl<crate::api::mock::MockTransport> {
        Repl::new(mock_app(), RestavoConfig::default())
    }

    #[tokio::test]
    async fn test_blank_line_is_ignored() {
        let mut repl = repl();
        assert_eq!(repl.process_line("   ").await.unwrap(), CommandResult::Continue);
        assert!(transport(&repl.app).requests().is_empty());
    }

    #[tokio::test]
    async fn test_exit_command() {
        let mut repl = repl();
        assert_eq!(repl.process_line("/exit").await.unwrap(), CommandResult::Exit);
    }

    #[tokio::test]
    async fn test_unknown_hotel_is_rejected() {
        let mut repl = repl();
        let result = repl.process_line("/fav Nowhere Inn").await;
        assert!(matches!(result, Err(RestavoError::Validation(_))));
        assert!(transport(&repl.app).requests().is_empty());
    }

    #[tokio::test]
    async fn test_booking_signed_out_then_login_replays() {
        let mut repl = repl();

        repl.process_line("/book palm beach hotel 2026-11-02 2026-11-04")
            .await
            .unwrap();
        assert!(!repl.app.pending().is_empty());
        assert!(has_signal(&repl.app.drain_events(), UiSignal::PromptLogin));
        assert!(transport(&repl.app).requests().is_empty());

        transport(&repl.app).script(
            "POST /login",
            MockReply::ok(json!({"message": "Logged in", "user_id": 7, "username": "amal"})),
        );
        transport(&repl.app).script("GET /favorites", MockReply::ok(json!([])));
        transport(&repl.app).script(
            "POST /booking",
            MockReply::status(201, r#"{"message": "Booking created", "booking_id": 31}"#),
        );

        repl.process_line("/login amal secret").await.unwrap();

        assert!(repl.app.pending().is_empty());
        let sent = transport(&repl.app).requests_to("POST /booking");
        assert_eq!(sent.len(), 1);
        let body = sent[0].body.as_ref().unwrap();
        assert_eq!(body["hotel_name"], "Palm Beach Hotel");
        assert_eq!(body["check_in"], "2026-11-02");
        assert_eq!(body["check_out"], "2026-11-04");
    }

    #[tokio::test(start_paused = true)]
    async fn test_plain_text_goes_to_chat() {
        let mut repl = repl();
        transport(&repl.app).script(
            "POST /gemini/chat",
            MockReply::ok(json!({"response": "Try Luxor in winter."})),
        );

        repl.process_line("Where should I go?").await.unwrap();

        let entries = repl.app.chat().entries();
        assert_eq!(entries.last().unwrap().text, "Try Luxor in winter.");
    }
}

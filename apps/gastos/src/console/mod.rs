//! Interactive console loop: read an intent, hand it to the controller,
//! redraw the screen from the resulting state.

pub mod intent;

use std::io::{self, BufRead, Write};

use gastos_client::{CommandOutcome, ControllerEvent, ExpenseController, FormDraft};
use tokio::sync::broadcast::error::RecvError;

use crate::ui::render_screen;
use intent::{is_affirmative, parse_intent, Intent, HELP};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub async fn run(&mut self, controller: &mut ExpenseController) -> io::Result<()> {
        controller.load().await;
        self.draw(controller)?;
        writeln!(self.output, "Digite 'ajuda' para ver os comandos.")?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            let intent = match parse_intent(&line) {
                Ok(intent) => intent,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };

            match intent {
                Intent::Quit => break,
                Intent::Help => {
                    writeln!(self.output, "{HELP}")?;
                    continue;
                }
                intent => self.dispatch(controller, intent).await?,
            }
            self.draw(controller)?;
        }
        Ok(())
    }

    async fn dispatch(
        &mut self,
        controller: &mut ExpenseController,
        intent: Intent,
    ) -> io::Result<()> {
        match intent {
            Intent::SetDescription(text) => self.edit_draft(controller, |d| d.description = text)?,
            Intent::SetDate(date) => self.edit_draft(controller, |d| d.date = date)?,
            Intent::SetAmount(amount) => self.edit_draft(controller, |d| d.amount = amount)?,
            Intent::Submit => {
                controller.submit().await;
            }
            Intent::Edit(id) => {
                if controller.begin_edit(id) == CommandOutcome::Ignored {
                    writeln!(self.output, "nenhum gasto com id {id}")?;
                }
            }
            Intent::Cancel => {
                controller.cancel_edit();
            }
            Intent::Delete(id) => {
                let input = &mut self.input;
                let output = &mut self.output;
                controller
                    .delete(id, &mut |prompt: &str| {
                        confirm(&mut *input, &mut *output, prompt)
                    })
                    .await;
            }
            Intent::Reload => {
                controller.load().await;
            }
            Intent::Show | Intent::Help | Intent::Quit => {}
        }
        Ok(())
    }

    fn edit_draft(
        &mut self,
        controller: &mut ExpenseController,
        apply: impl FnOnce(&mut FormDraft),
    ) -> io::Result<()> {
        match controller.draft_mut() {
            Some(draft) => apply(draft),
            None => writeln!(self.output, "aguarde a operação em andamento")?,
        }
        Ok(())
    }

    fn draw(&mut self, controller: &ExpenseController) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", render_screen(controller.state()))
    }
}

/// Asks a yes/no question on the console; I/O failures count as "no".
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> bool {
    if write!(output, "{prompt} [s/N] ")
        .and_then(|()| output.flush())
        .is_err()
    {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => is_affirmative(&answer),
        Err(_) => false,
    }
}

/// Prints a busy line on stderr whenever a command starts talking to the server.
pub fn spawn_busy_indicator(controller: &ExpenseController) {
    let mut events = controller.subscribe_events();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(ControllerEvent::LoadingStarted) => eprintln!("Processando..."),
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            }
        }
    });
}

use unsegen::input::*;

use super::context::{Context, Mode};

/// Runs the command line content when enter is pressed.
pub struct CommandParser<'a> {
    context: &'a mut Context,
}

impl<'a> CommandParser<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        CommandParser { context }
    }
}

impl Behavior for CommandParser<'_> {
    fn input(mut self, input: Input) -> Option<Input> {
        if let Event::Key(Key::Char('\n')) = input.event {
            let cmd = self.context.input_sink_mut().finish_line().to_owned();

            if let Err(e) = self.context.run_command(&cmd) {
                self.context.report_error(e.to_string());
            } else {
                self.context.mode = Mode::Normal;
            }
            None
        } else {
            Some(input)
        }
    }
}

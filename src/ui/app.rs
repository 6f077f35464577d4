use crate::config::Config;
use crate::events::{Dispatcher, Event};
use crate::selection::SelectionState;

use super::command::CommandParser;
use super::{Context, Mode, MonthPane};

use unsegen::base::{Cursor, StyleModifier, Terminal, Window, WrappingMode};
use unsegen::input::{
    EditBehavior, Input, Key, Navigatable, NavigateBehavior, OperationResult, ScrollBehavior,
};
use unsegen::widget::*;

pub struct App {
    context: Context,
}

impl App {
    pub fn new(config: &Config, state: SelectionState) -> App {
        App {
            context: Context::new(config, state),
        }
    }

    fn bottom_bar<'w>(&'w self) -> impl Widget + 'w {
        let spacer = " ".with_demand(|_| Demand2D {
            width: ColDemand::exact(1),
            height: RowDemand::exact(1),
        });

        let mut layout = HLayout::new().widget(spacer);

        if self.context.mode == Mode::Command {
            layout = layout.widget(self.context.input_sink().as_widget());
        }

        if let Some(msg) = &self.context.last_error_message {
            layout = layout.widget(ErrorLine {
                message: msg,
                style: self.context.theme().error_style,
            });
        }

        layout
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w {
        VLayout::new()
            .widget(MonthPane::new(&self.context))
            .widget(self.bottom_bar())
    }

    fn handle_input(&mut self, input: Input, run: &mut bool) {
        if input.matches(Key::Esc) {
            self.context.mode = Mode::Normal;
            return;
        }

        match self.context.mode {
            Mode::Normal => {
                let context = &mut self.context;
                input
                    .chain((Key::Char('q'), || *run = false))
                    .chain((Key::Char(':'), || context.mode = Mode::Command))
                    .chain((Key::Char('l'), || context.apply(SelectionState::next_month)))
                    .chain((Key::Char('h'), || context.apply(SelectionState::prev_month)))
                    .chain((Key::Char('L'), || context.apply(SelectionState::next_year)))
                    .chain((Key::Char('H'), || context.apply(SelectionState::prev_year)))
                    .chain((Key::Char('t'), || context.apply(|_| SelectionState::today())))
                    .chain(
                        NavigateBehavior::new(&mut SelectionBehaviour(context))
                            .down_on(Key::Down)
                            .up_on(Key::Up)
                            .left_on(Key::Left)
                            .right_on(Key::Right),
                    )
                    .finish();
            }
            Mode::Command => {
                input
                    .chain(
                        EditBehavior::new(self.context.input_sink_mut())
                            .delete_forwards_on(Key::Delete)
                            .delete_backwards_on(Key::Backspace)
                            .left_on(Key::Left)
                            .right_on(Key::Right),
                    )
                    .chain(
                        ScrollBehavior::new(self.context.input_sink_mut())
                            .backwards_on(Key::Up)
                            .forwards_on(Key::Down),
                    )
                    .chain(CommandParser::new(&mut self.context))
                    .finish();
            }
        }
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<SelectionState, Box<dyn std::error::Error>> {
        let mut run = true;

        while run {
            let root = term.create_root_window();
            self.as_widget().draw(root, RenderingHints::new());
            term.present();

            match dispatcher.next()? {
                Event::DateChanged(today) => self.context.set_today(today),
                Event::Input(input) => self.handle_input(input, &mut run),
            }
        }

        log::info!("Leaving with {:?}", self.context.state());

        Ok(self.context.state())
    }
}

struct ErrorLine<'a> {
    message: &'a str,
    style: StyleModifier,
}

impl Widget for ErrorLine<'_> {
    fn space_demand(&self) -> Demand2D {
        Widget::space_demand(&self.message)
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let mut cursor = Cursor::new(&mut window)
            .wrapping_mode(WrappingMode::Wrap)
            .style_modifier(self.style);
        cursor.write(self.message);
    }
}

/// Moves the selected day inside the displayed month.
struct SelectionBehaviour<'a>(&'a mut Context);

impl SelectionBehaviour<'_> {
    fn shift(&mut self, delta: i64) -> OperationResult {
        let state = self.0.state();
        let grid = self.0.grid();

        let target = match state.selected_day() {
            Some(day) => i64::from(day) + delta,
            None => 1,
        };

        if target < 1 || target > grid.day_count() as i64 {
            return Err(());
        }

        self.0.apply(|state| state.select_day(target as u32));
        Ok(())
    }
}

impl Navigatable for SelectionBehaviour<'_> {
    fn move_down(&mut self) -> OperationResult {
        self.shift(7)
    }

    fn move_left(&mut self) -> OperationResult {
        self.shift(-1)
    }

    fn move_right(&mut self) -> OperationResult {
        self.shift(1)
    }

    fn move_up(&mut self) -> OperationResult {
        self.shift(-7)
    }
}

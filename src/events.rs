use std::io;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{Local, NaiveDate};
use unsegen::input::Input;

use crate::config::Config;

pub enum Event {
    Input(Input),
    /// The local date moved on, so the today marker has to follow.
    DateChanged(NaiveDate),
}

/// Merges terminal input and local date changes into one channel.
pub struct Dispatcher {
    rx: mpsc::Receiver<Event>,
    _input_handle: JoinHandle<()>,
    _clock_handle: JoinHandle<()>,
}

impl Dispatcher {
    pub fn from_config(config: &Config) -> Dispatcher {
        let (tx, rx) = mpsc::channel();
        let input_handle = spawn_input_reader(tx.clone());

        let tick_rate = config.tick_rate;
        let clock_handle =
            thread::spawn(move || watch_date(&tx, tick_rate, || Local::now().date_naive()));

        Dispatcher {
            rx,
            _input_handle: input_handle,
            _clock_handle: clock_handle,
        }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

fn spawn_input_reader(tx: Sender<Event>) -> JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        for input in Input::read_all(stdin.lock()) {
            match input {
                Ok(input) => {
                    if tx.send(Event::Input(input)).is_err() {
                        return;
                    }
                }
                Err(err) => log::warn!("Unable to read input: {}", err),
            }
        }
    })
}

/// Polls `today` every `tick_rate` and sends the date whenever it differs
/// from the previous poll. Returns once the receiver is gone.
fn watch_date<F>(tx: &Sender<Event>, tick_rate: Duration, mut today: F)
where
    F: FnMut() -> NaiveDate,
{
    let mut last = today();

    loop {
        thread::sleep(tick_rate);

        let current = today();
        if current != last {
            log::debug!("Date changed from {} to {}", last, current);
            if tx.send(Event::DateChanged(current)).is_err() {
                return;
            }
            last = current;
        }
    }
}

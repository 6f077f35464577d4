extern crate datepick as lib;

use flexi_logger::{FileSpec, Logger};
use lib::calendar::MonthIndex;
use lib::command::run_commands;
use lib::events::Dispatcher;
use lib::selection::SelectionState;
use lib::ui::app::App;
use nix::sys::termios;
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;
use unsegen::base::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(name = "dp", about = "datepick - pick a single date in the terminal.")]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only print the month non-interactively"
    )]
    pub show: bool,

    #[structopt(
        short = "m",
        long = "month",
        help = "month to display first, as YYYY-MM (default: today)"
    )]
    pub month: Option<MonthIndex>,

    #[structopt(
        short = "e",
        long = "exec",
        help = "';' separated commands to run before showing the picker, e.g. \"2nm; sel 15\""
    )]
    pub exec: Option<String>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn print_selection(state: &SelectionState) {
    if let Some(date) = state.selected_date() {
        println!("{}", date);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    } else {
        // Keep stderr quiet while the terminal is in raw mode.
        logger = logger.do_not_log();
    }

    let _logger = logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let mut state = match args.month {
        Some(month) => SelectionState::new(month),
        None => SelectionState::today(),
    };

    if let Some(commands) = &args.exec {
        state = run_commands(state, commands, config.leap_rule)?;
    }

    if args.show {
        print!("{}", state.grid(config.leap_rule));
        print_selection(&state);
        return Ok(());
    }

    const TERMINAL_FD: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(termios::tcgetattr(TERMINAL_FD)?);

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(TERMINAL_FD, termios::SetArg::TCSANOW, &attr);
        }

        println!("datepick ran into a fatal error!");
        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let dispatcher = Dispatcher::from_config(&config);

    let picked = {
        let stdout = stdout();
        let term = Terminal::new(stdout.lock())?;

        let mut app = App::new(&config, state);
        app.run(dispatcher, term)?
    };

    print_selection(&picked);

    Ok(())
}

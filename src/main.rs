use structopt::StructOpt;
use tpasm::cli::command;

fn main() {
    command::terminal_init();
    command::root(command::CommandRoot::from_args());
}

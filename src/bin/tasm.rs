use structopt::StructOpt;
use tpasm::cli::command;

fn main() {
    command::terminal_init();
    command::asm(command::SubcommandAsm::from_args());
}

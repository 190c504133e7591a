mod command;
mod high_score;
mod logging;
#[cfg(test)]
mod testing;
mod tui;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}

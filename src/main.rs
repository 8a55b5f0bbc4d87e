fn main() {
    env_logger::init();
    if let Err(err) = ball_arena::app::run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn main() {
    appindex::app::cli::run();
}

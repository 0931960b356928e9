fn main() {
    vmprep::app::cli::run();
}

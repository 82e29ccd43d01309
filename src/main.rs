fn main() {
    dipole_plot::cli::run();
}

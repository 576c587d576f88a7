use vlasov_field::app::run;

fn main() -> color_eyre::Result<()> {
    run::<f64>()
}

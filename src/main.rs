#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use constellation::FieldConfig;

    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?
        .format(flexi_logger::detailed_format)
        .start()?;

    constellation::window::run(FieldConfig::default())?;
    Ok(())
}

// The browser build is a library; see `constellation::web::start`.
#[cfg(target_arch = "wasm32")]
fn main() {}

fn main() {
    // sdkconfig.defaults carries the OTA partition table the factory reset relies on.
    println!("cargo:rerun-if-changed=sdkconfig.defaults");

    if std::env::var("ESP_IDF_SDKCONFIG_DEFAULTS").is_err() {
        println!(
            "cargo:warning=ESP_IDF_SDKCONFIG_DEFAULTS not set; build from crates/reset-key-firmware so .cargo/config.toml applies"
        );
    }

    embuild::espidf::sysenv::output();
}

fn main() {
    // Reproducible builds pin the clock through SOURCE_DATE_EPOCH
    let built = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .and_then(|secs| time::OffsetDateTime::from_unix_timestamp(secs).ok())
        .unwrap_or_else(time::OffsetDateTime::now_utc);

    let stamp_fmt = time::format_description::parse("[year]-[month]-[day] [hour]:[minute] UTC")
        .expect("valid build stamp format");
    let stamp = built.format(&stamp_fmt).unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=RMMODEL_BUILD_STAMP={}", stamp);
}

use portmax::PortTableScanner;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let scans = PortTableScanner::default().scan_all();

    for scan in &scans {
        if let Some(diagnostic) = scan.diagnostic() {
            println!("{diagnostic}");
        }
    }

    for scan in &scans {
        println!("{}", scan.summary());
    }
}

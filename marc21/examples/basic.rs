use marc21::RecordReader;

fn main() {
    let mut args = std::env::args();
    args.next(); // name of executable

    let Some(file_name) = args.next() else {
        eprintln!("MARC file name required");
        return;
    };

    for record in RecordReader::from_file(&file_name).expect("File should be readable") {
        let record = record.expect("Record should be parseable");

        println!("Control number => {}", record.control_field("001").unwrap_or_default());

        let title = record.data_field("245").expect("245 is a data field");
        for idx in 0..title.value_count() {
            println!("Maintitle => {}", title.subfield("a", idx).unwrap_or_default());
            println!(
                "Indicators => {}",
                title.indicators(idx).ok().flatten().unwrap_or_default()
            );
        }

        for subject in record.get_values("650", "a").unwrap_or_default() {
            println!("Subject => {subject}");
        }

        println!("{}", record.to_breaker());
    }
}

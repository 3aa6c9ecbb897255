use std::env;
use std::fs;

use binchord::chord;
use binchord::chord::Selection;
use binchord::entity::Owner;
use binchord::fasta;
use binchord::import;
use binchord::repository::memory::Memory;
use tabled::builder::Builder;
use tabled::settings::Alignment;
use tabled::settings::Style;
use tabled::settings::object::Rows;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let contigs = env::args().nth(1).expect("missing contigs");
    let first = env::args().nth(2).expect("missing first assignments");
    let second = env::args().nth(3).expect("missing second assignments");

    let owner = Owner::from("demo");
    let mut repository = Memory::default();

    let reader = fasta::open(&contigs)?;
    import::import_contigset(&mut repository, &owner, "contigs", reader.into_inner())?;

    for (name, path) in [("first", &first), ("second", &second)] {
        let text = fs::read_to_string(path)?;
        import::import_binset(&mut repository, &owner, name, Some("contigs"), &text)?;
    }

    let matrix = chord::build(
        &repository,
        &owner,
        &Selection::all("first"),
        &Selection::all("second"),
    )?;

    let mut builder = Builder::default();

    let mut header = vec![String::from("Bin"), String::from("Color")];
    header.extend(matrix.labels().iter().cloned());
    builder.push_record(header);

    for (i, label) in matrix.labels().iter().enumerate() {
        let mut row = vec![label.clone(), matrix.colors()[i].to_string()];
        row.extend(matrix.values()[i].iter().map(|v| v.to_string()));
        builder.push_record(row);
    }

    let table = builder
        .build()
        .with(Style::rounded())
        .modify(Rows::new(1..), Alignment::left())
        .to_string();

    println!("{}", table);

    Ok(())
}

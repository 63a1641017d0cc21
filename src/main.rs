//! # Folio CLI
//!
//! Usage:
//!   folio input.json -o output.pdf
//!   echo '{ ... }' | folio -o output.pdf
//!   folio --example > invoice.json

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Render JSON documents with paginated tables to PDF", long_about = None)]
struct Cli {
    /// Document JSON. Read from stdin when omitted.
    input: Option<PathBuf>,

    /// Where to write the PDF
    #[arg(short, long, default_value = "output.pdf")]
    output: PathBuf,

    /// Print an example invoice document and exit
    #[arg(long)]
    example: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.example {
        print!("{}", example_invoice_json());
        return;
    }

    if let Err(e) = run(&cli) {
        eprintln!("✗ {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> folio::Result<()> {
    let input = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let pdf_bytes = folio::render_json(&input)?;
    fs::write(&cli.output, &pdf_bytes)?;
    eprintln!(
        "✓ Written {} bytes to {}",
        pdf_bytes.len(),
        cli.output.display()
    );
    Ok(())
}

fn example_invoice_json() -> &'static str {
    r##"{
  "metadata": {
    "title": "Customer Invoice",
    "author": "City Care Pharmacy"
  },
  "page": {
    "size": "Letter",
    "margin": { "top": 72, "right": 72, "bottom": 72, "left": 72 }
  },
  "content": [
    { "type": "Text", "content": "City Care Pharmacy", "x": 100, "y": 15, "font": "Helvetica-Bold", "size": 20, "align": "Center" },
    { "type": "Text", "content": "Customer Invoice", "x": 100, "y": 35, "font": "Helvetica", "align": "Center" },
    { "type": "Text", "content": "Name: Asha Verma", "x": 50, "y": 65, "size": 10 },
    { "type": "Text", "content": "Mobile: 98765 43210", "x": 50, "y": 75 },
    { "type": "Text", "content": "Prescribed By: Dr. R. Menon", "x": 50, "y": 85 },
    { "type": "Text", "content": "Payment Mode: UPI", "x": 50, "y": 95 },
    { "type": "Text", "content": "12 Station Road, Pune", "x": 200, "y": 65, "align": "Right" },
    { "type": "Text", "content": "GST: 27ABCDE1234F1Z5", "x": 200, "y": 75, "align": "Right" },
    { "type": "MoveDown" },
    {
      "type": "Table",
      "table": {
        "headers": ["Sno.", "M-ID", "Name", "Unit", "Cost(Rs.)", "Discount(%)", "GST(%)", "Amount(Rs.)"],
        "rows": [
          [1, "MED-101", "Paracetamol 500mg", "2", "25", 5, 12, "53.5"],
          [2, "MED-214", "Amoxicillin 250mg Capsules", "1", "110", 0, 12, "123.2"],
          [3, "MED-330", "Cetirizine", "3", "18", 10, 5, "51.3"],
          [4, "MED-412", "Vitamin D3 60K Softgel", "4", "42.5", 0, 18, "200.6"]
        ]
      },
      "options": { "startX": 10, "startY": 150, "width": 590 }
    },
    { "type": "Rule", "x1": 10, "x2": 600, "width": 1 },
    { "type": "MoveDown" },
    { "type": "Text", "content": "Grand Total: Rs. 428.6", "x": 50, "font": "Helvetica-Bold", "size": 14, "align": "Right" }
  ]
}
"##
}

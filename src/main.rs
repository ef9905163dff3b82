use std::env;
use std::process::ExitCode;

use mscurve::arrayops::trapz;
use mscurve::plot::find_annotation_peaks;
use mscurve::{SpectrumPlot, SpectrumPlotter};

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let (input, output) = match (args.next(), args.next()) {
        (Some(input), Some(output)) => (input, output),
        _ => {
            eprintln!("usage: mscurve <spectrum.txt> <chart.png|chart.svg>");
            return ExitCode::FAILURE;
        }
    };

    let mut plotter = SpectrumPlotter::new();
    let config = SpectrumPlot::builder().title(&input).save_as(&output).build();
    let data = match plotter.plot_file(&input, &config) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("failed to plot {}: {}", input, err);
            return ExitCode::FAILURE;
        }
    };

    let peaks = find_annotation_peaks(&data.xs, &data.ys, config.intensity_threshold);
    println!("Found {} annotation peaks", peaks.len());
    for (x, y) in peaks {
        println!("\t{:.4}\t{:.1}%", x, y);
    }
    println!("Total area: {}", trapz(&data.xs, &data.ys));
    println!("Wrote {}", output);
    ExitCode::SUCCESS
}

use std::time::Instant;

use clap::{App, ArgMatches, load_yaml};

use beam_color::color::ColoringInstance;
use beam_color::error::Result;
use beam_color::search::beam_search::{beam_search, IterationReport, Termination};
use beam_color::util::{read_params, export_results, RunStats};


/// reads the instance, runs the beam search and exports the solution
fn run(main_args:&ArgMatches) -> Result<()> {
    let params = read_params(main_args)?;
    let time_init = Instant::now();
    let quiet = params.quiet;
    let observer:&mut dyn FnMut(&IterationReport) = &mut |report| {
        if !quiet {
            println!(
                "iteration {}/{}: best state {} conflicts, {} colors",
                report.iteration, report.max_iter, report.best.conflicts(), report.best.nb_colors()
            );
        }
    };
    let res = beam_search(
        &params.instance,
        &params.pre_assigned,
        params.search,
        Some(observer),
    )?;
    let duration = time_init.elapsed().as_secs_f32();
    match res.termination {
        Termination::Success => println!("found a valid coloring with 0 conflicts."),
        Termination::Exhausted => println!(
            "best solution: {} conflicts, {} colors", res.best.conflicts(), res.best.nb_colors()
        ),
    }
    println!("beam search took {:.3} seconds. Nb colors: {}", duration, res.best.nb_colors());
    let stats = RunStats {
        inst_name: params.inst_filename.clone(),
        nb_vertices: params.instance.nb_vertices(),
        nb_edges: params.instance.nb_edges(),
        nb_colors: res.best.nb_colors(),
        nb_conflicts: res.best.conflicts(),
        iterations: res.iterations,
        success: res.termination == Termination::Success,
        time_searched: duration,
        beam_width: params.search.beam_width(),
        max_iter: params.search.max_iter(),
    };
    // export results
    export_results(
        &params.instance,
        res.best.coloring(),
        &stats,
        params.perf_file.as_deref(),
        &params.sol_file,
        true,
    )
}

/** solves a distance-2 coloring instance using a degree-first greedy and a local beam search */
pub fn main() {
    // parse arguments
    let yaml = load_yaml!("beam_color.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

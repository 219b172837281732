use std::fs;
use std::str::FromStr;

use clap::ArgMatches;
use serde::Serialize;

use crate::{
    color::{Coloring, ColoringInstance, PreAssigned, checker, CheckerResult},
    edge_list::{EdgeListInstance, read_preassigned},
    error::{ColoringError, Result},
    search::beam_search::BeamSearchParameters,
};

/// default name of the CSV solution file
pub const DEFAULT_OUTPUT:&str = "graph_coloring_output.csv";

/// header of the CSV solution file
pub const CSV_HEADER:[&str; 3] = ["Vertex", "Color", "Adjacent Vertices (Color)"];


/// everything a solver executable needs to run
#[derive(Debug)]
pub struct RunParameters {
    /// instance file name
    pub inst_filename: String,
    /// instance read from inst_filename
    pub instance: EdgeListInstance,
    /// fixed colors (empty if none given)
    pub pre_assigned: PreAssigned,
    /// beam width and number of iterations
    pub search: BeamSearchParameters,
    /// CSV solution file
    pub sol_file: String,
    /// optional statistics file (JSON)
    pub perf_file: Option<String>,
    /// if true, do not display the progress of each iteration
    pub quiet: bool,
}

/// statistics of a run, exported as JSON
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    /// instance file name
    pub inst_name: String,
    /// number of vertices
    pub nb_vertices: usize,
    /// number of edges
    pub nb_edges: usize,
    /// number of colors of the returned solution
    pub nb_colors: usize,
    /// number of conflicts of the returned solution
    pub nb_conflicts: usize,
    /// iterations performed
    pub iterations: usize,
    /// true iff the returned solution has no conflict
    pub success: bool,
    /// seconds spent (reading excluded)
    pub time_searched: f32,
    /// beam width used
    pub beam_width: usize,
    /// iteration budget
    pub max_iter: usize,
}


/// parses a numeric argument, reporting its name on failure
fn parse_arg<T:FromStr>(main_args:&ArgMatches, name:&str, default:&str) -> Result<T> {
    let value = main_args.value_of(name).unwrap_or(default);
    value.parse::<T>().map_err(|_| ColoringError::InvalidArgument {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/** reads command line input, the instance and the pre-assigned colors.

# Errors
 - if the instance or pre-assigned file cannot be read
 - if the beam width or the number of iterations is not a valid value
*/
pub fn read_params(main_args:&ArgMatches) -> Result<RunParameters> {
    let inst_filename = main_args.value_of("instance").ok_or_else(|| ColoringError::InvalidArgument {
        name: "instance".to_string(),
        value: String::default(),
    })?;
    let beam_width:usize = parse_arg(main_args, "beam_width", "10")?;
    let max_iter:usize = parse_arg(main_args, "max_iter", "50")?;
    let search = BeamSearchParameters::new(beam_width, max_iter)?;
    let sol_file = main_args.value_of("output").unwrap_or(DEFAULT_OUTPUT).to_string();
    println!("printing solutions in: {}", sol_file);
    // read value of the performance logs filename
    let perf_file: Option<String> = match main_args.value_of("perf") {
        None => None,
        Some(e) => {
            println!("printing perfs in: {}", e);
            Some(e.to_string())
        }
    };
    let pre_assigned = match main_args.value_of("preassigned") {
        None => PreAssigned::new(),
        Some(e) => {
            let res = read_preassigned(e)?;
            println!("{} pre-assigned vertices read from: {}", res.len(), e);
            res
        }
    };
    println!("reading instance: {}...", inst_filename);
    let instance = EdgeListInstance::from_file(inst_filename)?;
    instance.display_statistics();
    println!("=======================");
    Ok(RunParameters {
        inst_filename: inst_filename.to_string(),
        instance,
        pre_assigned,
        search,
        sol_file,
        perf_file,
        quiet: main_args.is_present("quiet"),
    })
}


/// quotes a CSV field if needed
fn csv_field(s:&str) -> String {
    if s.contains(|c:char| c == ',' || c == '"' || c == '\n' || c == '\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/** writes a string encoding the solution as CSV (use this to export the solution).
One row per vertex (ascending ids), its color, and its neighbors as `neighbor(color)`.
*/
pub fn coloring_to_csv_string(inst:&dyn ColoringInstance, coloring:&Coloring) -> String {
    let mut res = CSV_HEADER.iter().map(|h| csv_field(h)).collect::<Vec<_>>().join(",");
    res += "\n";
    for (v,c) in coloring {
        let adjacent_info = inst.neighbors(*v).iter()
            .map(|adj| match coloring.get(adj) {
                Some(adj_color) => format!("{}({})", adj, adj_color),
                None => format!("{}(-)", adj),
            })
            .collect::<Vec<_>>()
            .join(", ");
        res += format!("{},{},{}\n", v, c, csv_field(&adjacent_info)).as_str();
    }
    res
}

/** exports search results to files.

# Errors
 - if a file cannot be written
*/
pub fn export_results(
    inst:&dyn ColoringInstance,
    coloring:&Coloring,
    stats:&RunStats,
    perf_file:Option<&str>,
    sol_file:&str,
    check_result:bool,
) -> Result<()> {
    // export statistics
    if let Some(filename) = perf_file {
        let content = serde_json::to_string(stats)
            .map_err(|source| ColoringError::Json { path: filename.to_string(), source })?;
        fs::write(filename, content)
            .map_err(|source| ColoringError::Io { path: filename.to_string(), source })?;
    }
    // export solution
    if check_result {
        match checker(inst, coloring) {
            CheckerResult::Ok(_) => {},
            checker_result => { println!("invalid solution (reason: {:?})", checker_result) }
        };
    }
    fs::write(sol_file, coloring_to_csv_string(inst, coloring))
        .map_err(|source| ColoringError::Io { path: sol_file.to_string(), source })?;
    println!("results saved in {}", sol_file);
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    use clap::{App, load_yaml};

    #[test]
    fn test_csv_rows() {
        let inst = EdgeListInstance::from_edges(&[(3,1),(1,2),(2,3),(3,4)]);
        let coloring:Coloring = vec![(4,1),(3,2),(2,3),(1,1)].into_iter().collect();
        let s = coloring_to_csv_string(&inst, &coloring);
        let rows:Vec<&str> = s.lines().collect();
        assert_eq!(rows.len(), inst.nb_vertices() + 1);
        assert_eq!(rows[0], "Vertex,Color,Adjacent Vertices (Color)");
        assert_eq!(rows[1], "1,1,\"2(3), 3(2)\"");
        assert_eq!(rows[2], "2,3,\"1(1), 3(2)\"");
        assert_eq!(rows[3], "3,2,\"1(1), 2(3), 4(1)\"");
        assert_eq!(rows[4], "4,1,3(2)");
    }

    #[test]
    fn test_csv_field() {
        assert_eq!(csv_field("abc"), "abc");
        assert_eq!(csv_field("a, b"), "\"a, b\"");
        assert_eq!(csv_field("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_csv_empty() {
        let inst = EdgeListInstance::from_edges(&[]);
        let s = coloring_to_csv_string(&inst, &Coloring::new());
        assert_eq!(s.lines().count(), 1);
    }

    fn cycle4_stats() -> RunStats {
        RunStats {
            inst_name: "insts/cycle4.txt".to_string(),
            nb_vertices: 4,
            nb_edges: 4,
            nb_colors: 4,
            nb_conflicts: 0,
            iterations: 1,
            success: true,
            time_searched: 0.,
            beam_width: 10,
            max_iter: 50,
        }
    }

    /// creates (if needed) a directory for the files written by the tests
    fn output_dir() -> String {
        let dir = "target/test-output";
        fs::create_dir_all(dir).unwrap();
        dir.to_string()
    }

    /// parses a command line with the solver arguments, then reads the parameters
    fn read_args(argv:&[&str]) -> Result<RunParameters> {
        let yaml = load_yaml!("bin/beam_color.yml");
        let main_args = App::from_yaml(yaml)
            .get_matches_from(argv.iter().map(|a| a.to_string()).collect::<Vec<String>>());
        read_params(&main_args)
    }

    #[test]
    fn test_stats_json() {
        let value = serde_json::to_value(&cycle4_stats()).unwrap();
        assert_eq!(value["nb_colors"], 4);
        assert_eq!(value["success"], true);
        assert_eq!(value["inst_name"], "insts/cycle4.txt");
    }

    #[test]
    fn test_export_results() {
        let dir = output_dir();
        let sol_file = format!("{}/export_cycle4.csv", dir);
        let perf_file = format!("{}/export_cycle4.json", dir);
        let inst = EdgeListInstance::from_file("insts/cycle4.txt").unwrap();
        let coloring:Coloring = vec![(0,1),(1,2),(2,3),(3,4)].into_iter().collect();
        export_results(&inst, &coloring, &cycle4_stats(), Some(perf_file.as_str()), &sol_file, true).unwrap();
        let csv = fs::read_to_string(&sol_file).unwrap();
        assert_eq!(csv, coloring_to_csv_string(&inst, &coloring));
        assert_eq!(csv.lines().count(), 5);
        let stats:serde_json::Value = serde_json::from_str(&fs::read_to_string(&perf_file).unwrap()).unwrap();
        assert_eq!(stats["nb_vertices"], 4);
        assert_eq!(stats["iterations"], 1);
    }

    #[test]
    fn test_export_to_missing_directory() {
        let dir = output_dir();
        let sol_file = format!("{}/no_such_dir/out.csv", dir);
        let inst = EdgeListInstance::from_file("insts/cycle4.txt").unwrap();
        let coloring:Coloring = vec![(0,1),(1,2),(2,3),(3,4)].into_iter().collect();
        match export_results(&inst, &coloring, &cycle4_stats(), None, &sol_file, false) {
            Err(ColoringError::Io { path, .. }) => assert_eq!(path, sol_file),
            other => panic!("expected an io error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_params() {
        let params = read_args(&[
            "beam_color", "insts/hypercube3.txt",
            "-b", "3", "-i", "7", "-p", "insts/hypercube3_preassigned.json", "-q",
        ]).unwrap();
        assert_eq!(params.inst_filename, "insts/hypercube3.txt");
        assert_eq!(params.instance.nb_vertices(), 8);
        assert_eq!(params.search.beam_width(), 3);
        assert_eq!(params.search.max_iter(), 7);
        assert_eq!(params.pre_assigned.len(), 2);
        assert_eq!(params.sol_file, DEFAULT_OUTPUT);
        assert_eq!(params.perf_file, None);
        assert!(params.quiet);
    }

    #[test]
    fn test_read_params_errors() {
        assert!(matches!(
            read_args(&["beam_color", "insts/cycle4.txt", "-b", "0"]),
            Err(ColoringError::InvalidBeamWidth(0))
        ));
        assert!(matches!(
            read_args(&["beam_color", "insts/cycle4.txt", "-i", "abc"]),
            Err(ColoringError::InvalidArgument { .. })
        ));
        assert!(matches!(
            read_args(&["beam_color", "insts/does_not_exist.txt"]),
            Err(ColoringError::Io { .. })
        ));
    }
}

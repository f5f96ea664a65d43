// Visibility graph path planning demo
//
// usage: visibility_graph [OBSTACLE_FILE] [SX SY GX GY]
//
// Without arguments plans around a single triangle. The obstacle file holds
// records of the form `n x1 y1 ... xn yn`.

use std::env;
use std::process;

use log::error;

use visibility_planning::utils::{quick_plot_scene, read_polygons_file};
use visibility_planning::{PlanningError, PlanningResult, Point2D, Polygon, VisibilityGraphPlanner};

fn default_scene() -> Vec<Polygon> {
    vec![Polygon::from_xy(&[-2.0, 2.0, 0.0], &[-2.0, -2.0, 4.0])]
}

fn parse_point(x: &str, y: &str) -> PlanningResult<Point2D> {
    let parse = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| PlanningError::ParseError(format!("bad coordinate '{}'", s)))
    };
    Ok(Point2D::new(parse(x)?, parse(y)?))
}

fn run(args: &[String]) -> PlanningResult<()> {
    let polygons = match args.get(1) {
        Some(path) => read_polygons_file(path)?,
        None => default_scene(),
    };

    let (start, goal) = if args.len() >= 6 {
        (parse_point(&args[2], &args[3])?, parse_point(&args[4], &args[5])?)
    } else {
        (Point2D::new(-10.0, 0.0), Point2D::new(10.0, 0.0))
    };

    println!("Visibility graph planning start!");
    println!("{} obstacles, start {} goal {}", polygons.len(), start, goal);

    let planner = VisibilityGraphPlanner::from_polygons(&polygons)?;
    let result = planner.search(start, goal)?;

    print!("{}", result.path);
    if result.is_success() {
        println!("cost: {:.4}", result.cost);
    }
    println!(
        "expanded {} generated {} pruned {} peak tree {}",
        result.stats.nodes_expanded,
        result.stats.nodes_generated,
        result.stats.nodes_pruned,
        result.stats.max_tree_size
    );

    let (graph, _, _) = planner.query_graph(start, goal)?;
    let vis = quick_plot_scene(&graph, &result.path, start, goal, "Visibility Graph");
    let out = "./img/path_planning/visibility_graph.svg";
    let saved = std::fs::create_dir_all("./img/path_planning")
        .map_err(|e| e.to_string())
        .and_then(|_| vis.save_svg(out));
    match saved {
        Ok(()) => println!("Plot saved to {}", out),
        Err(e) => error!("could not save plot: {}", e),
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

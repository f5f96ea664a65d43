//! Visualization utilities for visibility graph planning
//!
//! Provides a unified interface for plotting using gnuplot.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};

use crate::common::{Path2D, Point2D, Polygon, Visualizable};
use crate::visibility::VisibilityGraph;

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const GREEN: &str = "#00FF00";
    pub const BLUE: &str = "#0000FF";
    pub const GRAY: &str = "#808080";
    pub const LIGHT_GRAY: &str = "#C8C8C8";

    // Semantic colors
    pub const OBSTACLE: &str = BLACK;
    pub const VISIBILITY_EDGE: &str = LIGHT_GRAY;
    pub const VERTEX: &str = GRAY;
    pub const START: &str = GREEN;
    pub const GOAL: &str = BLUE;
    pub const PATH: &str = RED;
}

/// Style for path rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: colors::PATH.to_string(),
            line_width: 2.0,
            caption: "Path".to_string(),
        }
    }
}

/// Style for point rendering
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub color: String,
    pub size: f64,
    pub symbol: char,
    pub caption: String,
}

impl PointStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            size: 1.0,
            symbol: 'O',
            caption: caption.to_string(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }
}

/// One plotted series, buffered until the figure is rendered
#[derive(Debug, Clone)]
enum Series {
    Lines { x: Vec<f64>, y: Vec<f64>, style: PathStyle },
    Points { x: Vec<f64>, y: Vec<f64>, style: PointStyle },
}

/// Main visualizer struct
///
/// Series accumulate on a single set of axes and are drawn when the figure is saved.
pub struct Visualizer {
    series: Vec<Series>,
    title: String,
    x_label: String,
    y_label: String,
    aspect_ratio: Option<f64>,
}

impl Visualizer {
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            title: String::new(),
            x_label: "X".to_string(),
            y_label: "Y".to_string(),
            aspect_ratio: Some(1.0),
        }
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    /// Number of buffered series
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Plot a polyline from x,y vectors
    pub fn plot_path_xy(&mut self, x: &[f64], y: &[f64], style: &PathStyle) -> &mut Self {
        self.series.push(Series::Lines {
            x: x.to_vec(),
            y: y.to_vec(),
            style: style.clone(),
        });
        self
    }

    /// Plot a path as a polyline
    pub fn plot_path(&mut self, path: &Path2D, style: &PathStyle) -> &mut Self {
        if path.is_empty() {
            return self;
        }
        self.plot_path_xy(&path.x_coords(), &path.y_coords(), style)
    }

    /// Plot obstacle polygons as closed outlines
    pub fn plot_polygons(&mut self, polygons: &[Polygon]) -> &mut Self {
        for (i, polygon) in polygons.iter().enumerate() {
            let (x, y) = closed_ring(polygon);
            // Only the first outline carries the legend entry
            let caption = if i == 0 { "Obstacles" } else { "" };
            let style = PathStyle::new(colors::OBSTACLE, caption).with_line_width(1.5);
            self.plot_path_xy(&x, &y, &style);
        }
        self
    }

    /// Plot each edge of the visibility graph as a thin segment
    pub fn plot_visibility_edges(&mut self, graph: &VisibilityGraph) -> &mut Self {
        for (i, edge) in graph.edges().iter().enumerate() {
            let (a, b) = match (graph.position(edge.a), graph.position(edge.b)) {
                (Some(a), Some(b)) => (a, b),
                _ => continue,
            };
            let caption = if i == 0 { "Visibility" } else { "" };
            let style = PathStyle::new(colors::VISIBILITY_EDGE, caption).with_line_width(0.5);
            self.plot_path_xy(&[a.x, b.x], &[a.y, b.y], &style);
        }
        self
    }

    /// Plot multiple points
    pub fn plot_points(&mut self, points: &[Point2D], style: &PointStyle) -> &mut Self {
        self.series.push(Series::Points {
            x: points.iter().map(|p| p.x).collect(),
            y: points.iter().map(|p| p.y).collect(),
            style: style.clone(),
        });
        self
    }

    /// Plot a single point (start, goal, etc.)
    pub fn plot_point(&mut self, point: Point2D, style: &PointStyle) -> &mut Self {
        self.plot_points(&[point], style)
    }

    pub fn plot_start(&mut self, point: Point2D) -> &mut Self {
        self.plot_point(point, &PointStyle::new(colors::START, "Start").with_size(1.5))
    }

    pub fn plot_goal(&mut self, point: Point2D) -> &mut Self {
        self.plot_point(point, &PointStyle::new(colors::GOAL, "Goal").with_size(1.5))
    }

    /// Plot anything that knows how to draw itself
    pub fn plot<V: Visualizable + ?Sized>(&mut self, item: &V) -> &mut Self {
        item.visualize(self);
        self
    }

    /// Save plot to SVG file
    pub fn save_svg(&self, path: &str) -> Result<(), String> {
        self.render().save_to_svg(path, 800, 600).map_err(|e| e.to_string())
    }

    fn render(&self) -> Figure {
        let mut figure = Figure::new();
        let axes = figure.axes2d();

        for series in &self.series {
            match series {
                Series::Lines { x, y, style } => {
                    axes.lines(
                        x,
                        y,
                        &[
                            Caption(&style.caption),
                            Color(&style.color),
                            LineWidth(style.line_width),
                        ],
                    );
                }
                Series::Points { x, y, style } => {
                    axes.points(
                        x,
                        y,
                        &[
                            Caption(&style.caption),
                            Color(&style.color),
                            PointSymbol(style.symbol),
                            PointSize(style.size),
                        ],
                    );
                }
            }
        }

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label(&self.x_label, &[]);
        axes.set_y_label(&self.y_label, &[]);

        if let Some(ratio) = self.aspect_ratio {
            axes.set_aspect_ratio(AutoOption::Fix(ratio));
        }

        figure
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Visualizable for VisibilityGraph {
    fn visualize(&self, vis: &mut Visualizer) {
        vis.plot_visibility_edges(self);
        vis.plot_polygons(self.polygons());
        let corners: Vec<Point2D> = self.vertices().iter().map(|v| v.position).collect();
        if !corners.is_empty() {
            vis.plot_points(&corners, &PointStyle::new(colors::VERTEX, "Vertices").with_size(0.6));
        }
    }
}

/// Outline coordinates with the first vertex repeated at the end
fn closed_ring(polygon: &Polygon) -> (Vec<f64>, Vec<f64>) {
    let mut x = polygon.x_coords();
    let mut y = polygon.y_coords();
    if let (Some(&x0), Some(&y0)) = (x.first(), y.first()) {
        x.push(x0);
        y.push(y0);
    }
    (x, y)
}

/// Quick plot of a planning scene: obstacles, graph, start, goal and path
pub fn quick_plot_scene(
    graph: &VisibilityGraph,
    path: &Path2D,
    start: Point2D,
    goal: Point2D,
    title: &str,
) -> Visualizer {
    let mut vis = Visualizer::new();
    vis.set_title(title);
    vis.plot(graph);
    vis.plot_path(path, &PathStyle::default());
    vis.plot_start(start);
    vis.plot_goal(goal);
    vis
}

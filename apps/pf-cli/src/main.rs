use clap::{Args, Parser, Subcommand};
use pf_core::units::{kgpm3, m, m3ps, mps, mps2, pas};
use pf_solver::{
    f_to_re, re_to_f, solve_from_coupling, solve_from_coupling_legacy, Coupling,
    DiameterRelation, FluidProps, HeadLoss, Regime, SolveOptions, Solutions,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pf-cli")]
#[command(about = "Pipeflow CLI - pipe friction-factor solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve for (Re, f) from head-loss inputs
    #[command(subcommand)]
    Solve(SolveCommands),
    /// Friction factor at a known Reynolds number
    ReToF {
        re: f64,
        /// Relative roughness
        #[arg(long, default_value_t = 0.0)]
        roughness: f64,
    },
    /// Reynolds number(s) at a known friction factor
    FToRe {
        f: f64,
        /// Relative roughness
        #[arg(long, default_value_t = 0.0)]
        roughness: f64,
    },
    /// Export sampled Moody-chart curves as JSON
    Chart {
        /// Relative roughness values, one Colebrook curve each
        #[arg(long, num_args = 1.., default_values_t = [0.0001, 0.001, 0.01])]
        roughness: Vec<f64>,
        /// Upper end of the Reynolds range
        #[arg(long, default_value_t = 1e8)]
        re_max: f64,
        /// Samples per curve
        #[arg(long, default_value_t = 200)]
        samples: usize,
        /// Output JSON file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SolveCommands {
    /// Head loss with known mean velocity
    HeadVelocity {
        #[command(flatten)]
        base: BaseArgs,
        /// Mean velocity
        #[arg(long)]
        velocity: f64,
    },
    /// Head loss with known hydraulic diameter
    HeadDiameter {
        #[command(flatten)]
        base: BaseArgs,
        /// Hydraulic diameter
        #[arg(long)]
        diameter: f64,
    },
    /// Head loss with known volumetric flow rate
    HeadFlowRate {
        #[command(flatten)]
        base: BaseArgs,
        /// Volumetric flow rate
        #[arg(long)]
        flow_rate: f64,
    },
}

#[derive(Args)]
struct BaseArgs {
    /// Head loss over the pipe run
    #[arg(long)]
    head: f64,
    /// Pipe length
    #[arg(long)]
    length: f64,
    /// Fluid density
    #[arg(long)]
    density: f64,
    /// Dynamic viscosity
    #[arg(long)]
    viscosity: f64,
    /// Gravitational acceleration
    #[arg(long, default_value_t = pf_core::units::constants::G0_MPS2)]
    gravity: f64,
    /// Relative roughness
    #[arg(long, default_value_t = 0.0)]
    roughness: f64,
    /// Absolute roughness length (eps is derived from the diameter, per
    /// candidate Re where the diameter depends on Re)
    #[arg(long)]
    absolute_roughness: Option<f64>,
    /// Skip the laminar candidate
    #[arg(long)]
    no_laminar: bool,
    /// Skip the turbulent candidate
    #[arg(long)]
    no_turbulent: bool,
    /// Suppress the roughness-clamp advisory
    #[arg(long)]
    quiet_clamp: bool,
    /// Use the legacy damped search (historical behavior parity)
    #[arg(long)]
    legacy: bool,
    /// Print solutions as JSON
    #[arg(long)]
    json: bool,
    /// Write a sampled chart of the case to this JSON file
    #[arg(long)]
    chart: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve(solve_cmd) => match solve_cmd {
            SolveCommands::HeadVelocity { base, velocity } => {
                let (coupling, diameter) = Coupling::from_head_velocity(
                    &base.geom(),
                    &base.fluid(),
                    mps(velocity),
                )?;
                cmd_solve(&base, &coupling, &diameter)
            }
            SolveCommands::HeadDiameter { base, diameter } => {
                let (coupling, rel) = Coupling::from_head_diameter(
                    &base.geom(),
                    &base.fluid(),
                    m(diameter),
                )?;
                cmd_solve(&base, &coupling, &rel)
            }
            SolveCommands::HeadFlowRate { base, flow_rate } => {
                let (coupling, rel) = Coupling::from_head_flow_rate(
                    &base.geom(),
                    &base.fluid(),
                    m3ps(flow_rate),
                )?;
                cmd_solve(&base, &coupling, &rel)
            }
        },
        Commands::ReToF { re, roughness } => {
            let f = re_to_f(re, roughness)?;
            println!("f = {f:.6}");
            Ok(())
        }
        Commands::FToRe { f, roughness } => {
            let sols = f_to_re(f, roughness)?;
            print_solutions(&sols);
            Ok(())
        }
        Commands::Chart {
            roughness,
            re_max,
            samples,
            output,
        } => cmd_chart(&roughness, re_max, samples, output.as_deref()),
    }
}

impl BaseArgs {
    fn geom(&self) -> HeadLoss {
        HeadLoss {
            head: m(self.head),
            length: m(self.length),
            gravity: mps2(self.gravity),
        }
    }

    fn fluid(&self) -> FluidProps {
        FluidProps {
            density: kgpm3(self.density),
            viscosity: pas(self.viscosity),
        }
    }

    fn options(&self) -> SolveOptions {
        SolveOptions {
            check_laminar: !self.no_laminar,
            check_turbulent: !self.no_turbulent,
            roughness_clamp_notify: !self.quiet_clamp,
        }
    }
}

fn cmd_solve(
    base: &BaseArgs,
    coupling: &Coupling,
    diameter: &DiameterRelation,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = base.options();

    let sols = match (base.absolute_roughness, base.legacy) {
        // Absolute roughness with a Re-dependent diameter needs the
        // per-candidate re-derivation of the legacy path; a fixed
        // diameter reduces to a constant eps up front.
        (Some(thk), _) => match *diameter {
            DiameterRelation::Fixed(d) if !base.legacy => {
                solve_from_coupling(coupling, thk / d, &options)?
            }
            rel => solve_from_coupling_legacy(
                coupling,
                |re| rel.relative_roughness_at(thk, re),
                &options,
            )?,
        },
        (None, true) => {
            solve_from_coupling_legacy(coupling, |_| base.roughness, &options)?
        }
        (None, false) => solve_from_coupling(coupling, base.roughness, &options)?,
    };

    if base.json {
        println!("{}", serde_json::to_string_pretty(&sols)?);
    } else {
        print_solutions(&sols);
    }

    if let Some(path) = &base.chart {
        write_case_chart(path, coupling, base.roughness, &sols)?;
        println!("chart written to {}", path.display());
    }
    Ok(())
}

fn print_solutions(sols: &Solutions) {
    for s in sols.iter() {
        let regime = match s.regime {
            Regime::Laminar => "laminar",
            Regime::Turbulent => "turbulent",
        };
        println!("{regime:>9}: Re = {:<12.1} f = {:.6}", s.re, s.f);
    }
}

fn write_case_chart(
    path: &Path,
    coupling: &Coupling,
    eps: f64,
    sols: &Solutions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut chart = pf_chart::ChartState::default();
    chart.push_curve(pf_chart::laminar_curve(600.0, 100));
    chart.push_curve(pf_chart::colebrook_curve(eps, 2.3e3, 1e8, 200)?);
    chart.push_curve(pf_chart::coupling_curve(coupling, 600.0, 1e8, 200));
    for (i, s) in sols.iter().enumerate() {
        chart.mark_solution(format!("solution {}", i + 1), &s);
    }
    std::fs::write(path, serde_json::to_string_pretty(&chart)?)?;
    Ok(())
}

fn cmd_chart(
    roughness: &[f64],
    re_max: f64,
    samples: usize,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut chart = pf_chart::ChartState::default();
    chart.push_curve(pf_chart::laminar_curve(600.0, samples));
    for &eps in roughness {
        chart.push_curve(pf_chart::colebrook_curve(eps, 2.3e3, re_max, samples)?);
    }

    let json = serde_json::to_string_pretty(&chart)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            println!("chart written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

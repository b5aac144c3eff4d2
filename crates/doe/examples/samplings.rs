use lhcube_doe::{summary, JitterSelector, Lhs, PermutationDraw};
use ndarray::arr2;

fn main() -> lhcube_doe::Result<()> {
    let xlimits = arr2(&[[0., 1.], [-10., 10.], [5., 15.]]);
    let n = 10;

    println!("Take {n} samples in");
    println!("{xlimits}\n");

    println!("*** using latin hypercube sampling on strata lower edges");
    let design = Lhs::new(&xlimits).generate(n)?;
    println!("{}\n", design.samples());

    println!("*** using jittered latin hypercube sampling");
    let design = Lhs::new(&xlimits)
        .jitter(JitterSelector::All)
        .draw(PermutationDraw::Rejection)
        .generate(n)?;
    design.write_csv(std::io::stdout(), &["x", "y", "z"])?;

    println!("\n*** statistics");
    for (j, s) in summary(design.samples())?.iter().enumerate() {
        println!("dim{j}: mean={} std_dev={:?}", s.mean, s.std_dev);
    }
    Ok(())
}

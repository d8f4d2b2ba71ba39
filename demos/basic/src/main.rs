use lightgbm_tabular::parameters::{ClassifierOptions, Objective};
use lightgbm_tabular::{Attribute, Classifier, LightGbm, Table};

/// Two numeric measurements and a nominal colour; the class is "good" when the measurements
/// add up to more than 10 or the colour is blue.
fn build_table(num_rows: usize) -> Table {
    let mut table = Table::new("quality", vec![
        Attribute::numeric("width"),
        Attribute::numeric("height"),
        Attribute::nominal("colour", vec!["red", "green", "blue"]),
        Attribute::nominal("quality", vec!["bad", "good"]),
    ]);
    table.set_class_index(Some(3)).unwrap();

    for i in 0..num_rows {
        let width = (i % 9) as f64;
        let height = ((i * 7) % 11) as f64;
        let colour = (i % 3) as f64;
        let good = width + height > 10.0 || colour == 2.0;
        table.add_row(vec![width, height, colour, if good { 1.0 } else { 0.0 }]).unwrap();
    }
    table
}

fn main() {
    env_logger::init();

    let table = build_table(500);
    println!("Training data: {}", table);

    // Configure objective, iterations and validation split as command-line flags.
    let mut options = ClassifierOptions::from_args(&["-I", "50", "-V", "20", "-R", "-S", "7"]).unwrap();
    options.set_objective(Objective::Binary);
    options.set_parameters("num_leaves=15 learning_rate=0.1 verbosity=-1");
    println!("Options: {}", options);

    let mut model = LightGbm::new(options);
    let summary = model.train(&table).unwrap();
    println!(
        "Trained for {} iterations on {} rows ({} held out for validation)",
        summary.iterations, summary.training_rows, summary.validation_rows
    );
    println!("Engine parameters: {}", model.actual_parameters().unwrap());

    // Check predictions against the training rows.
    let num_correct = table
        .rows()
        .iter()
        .filter(|row| model.classify(row).unwrap() == row[3])
        .count();
    println!("accuracy={} ({}/{} correct)", num_correct as f64 / table.num_rows() as f64, num_correct, table.num_rows());

    // Persist the classifier, then restore it; the booster is rebuilt from the model text.
    println!("\nSaving and loading classifier...");
    let json = model.to_json().unwrap();
    let mut restored = LightGbm::from_json(&json).unwrap();
    let row = [8.0, 9.0, 0.0, f64::NAN];
    let before = model.distribution(&row).unwrap();
    let after = restored.distribution(&row).unwrap();
    println!("distribution before={:?} after={:?}", before, after);
    assert_eq!(before, after);
}

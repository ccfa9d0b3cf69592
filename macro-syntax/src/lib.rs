#[macro_export]
macro_rules! formula {
    ($($expr:tt)+) => {{
        let input = stringify!($($expr)+);
        let parsed_formula = rstruth::ParsedFormula::parse(input).expect("could not parse expression");

        parsed_formula
    }};
}

#[macro_export]
macro_rules! truth_table {
    ($($expr:tt)+) => {{
        let parsed_formula = $crate::formula!($($expr)+);

        rstruth::TruthTable::from_formula(&parsed_formula, &rstruth::TruthTableOptions::default())
            .expect("could not build truth table")
    }};
}

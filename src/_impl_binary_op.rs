use crate::BinaryOp;
use crate::BinaryOp::*;
use std::fmt::{Display, Error, Formatter};

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let symbol = match self {
            And => "&",
            Or => "|",
            Xor => "^",
            Imp => "=>",
            Iff => "<=>",
        };
        write!(f, "{}", symbol)?;
        Ok(())
    }
}

impl BinaryOp {
    /// Apply this operator to two Boolean values.
    pub fn eval(&self, left: bool, right: bool) -> bool {
        match self {
            And => left && right,
            Or => left || right,
            Xor => left != right,
            Imp => !left || right,
            Iff => left == right,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::BinaryOp::*;

    #[test]
    fn binary_op_truth_tables() {
        let pairs = [(false, false), (false, true), (true, false), (true, true)];
        let and: Vec<bool> = pairs.iter().map(|(l, r)| And.eval(*l, *r)).collect();
        let imp: Vec<bool> = pairs.iter().map(|(l, r)| Imp.eval(*l, *r)).collect();
        let iff: Vec<bool> = pairs.iter().map(|(l, r)| Iff.eval(*l, *r)).collect();
        assert_eq!(vec![false, false, false, true], and);
        assert_eq!(vec![true, true, false, true], imp);
        assert_eq!(vec![true, false, false, true], iff);
        assert!(Xor.eval(true, false));
        assert!(!Or.eval(false, false));
        assert_eq!("<=>", Iff.to_string());
    }
}

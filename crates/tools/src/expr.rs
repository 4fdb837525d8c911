//! Expression parsing and evaluation for univariate functions of `x`.
//!
//! Supports `+`, `-`, `*`, `/`, `^` (also Python's `**`), parentheses,
//! unary negation, decimal numbers, and the variable `x`. Uses a
//! recursive-descent parser. No dependencies beyond std.
//!
//! The parsed AST serves two callers: the plotter evaluates it at many
//! sample points, and the equation solver lowers it to polynomial
//! coefficients when possible.

/// Parse an expression into an AST.
pub fn parse(input: &str) -> Result<Expr, String> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err("Empty expression".into());
    }
    let mut parser = Parser::new(&tokens);
    let expr = parser.parse_expr()?;
    if parser.pos < parser.tokens.len() {
        return Err(format!(
            "Unexpected token at position {}: {:?}",
            parser.pos, parser.tokens[parser.pos]
        ));
    }
    Ok(expr)
}

/// An expression tree over numbers and the variable `x`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    Var,
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Evaluate at a given value of `x`. Division by zero and similar
    /// produce non-finite values rather than errors; callers filter.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Expr::Num(n) => *n,
            Expr::Var => x,
            Expr::Neg(e) => -e.eval(x),
            Expr::Add(a, b) => a.eval(x) + b.eval(x),
            Expr::Sub(a, b) => a.eval(x) - b.eval(x),
            Expr::Mul(a, b) => a.eval(x) * b.eval(x),
            Expr::Div(a, b) => a.eval(x) / b.eval(x),
            Expr::Pow(a, b) => a.eval(x).powf(b.eval(x)),
        }
    }

    /// Lower to dense polynomial coefficients `[c0, c1, c2, ...]`
    /// (constant term first). Returns None when the expression is not a
    /// polynomial in `x` (division by `x`, fractional exponents, ...).
    pub fn to_poly(&self) -> Option<Vec<f64>> {
        let poly = match self {
            Expr::Num(n) => vec![*n],
            Expr::Var => vec![0.0, 1.0],
            Expr::Neg(e) => {
                let mut p = e.to_poly()?;
                for c in &mut p {
                    *c = -*c;
                }
                p
            }
            Expr::Add(a, b) => poly_add(&a.to_poly()?, &b.to_poly()?, 1.0),
            Expr::Sub(a, b) => poly_add(&a.to_poly()?, &b.to_poly()?, -1.0),
            Expr::Mul(a, b) => poly_mul(&a.to_poly()?, &b.to_poly()?),
            Expr::Div(a, b) => {
                // Only division by a nonzero constant stays polynomial.
                let divisor = b.to_poly()?;
                if divisor.len() != 1 || divisor[0] == 0.0 {
                    return None;
                }
                let mut p = a.to_poly()?;
                for c in &mut p {
                    *c /= divisor[0];
                }
                p
            }
            Expr::Pow(base, exp) => {
                let exponent = exp.to_poly()?;
                if exponent.len() != 1 {
                    return None;
                }
                let e = exponent[0];
                if e < 0.0 || e.fract() != 0.0 || e > 64.0 {
                    return None;
                }
                let base = base.to_poly()?;
                let mut p = vec![1.0];
                for _ in 0..(e as u32) {
                    p = poly_mul(&p, &base);
                }
                p
            }
        };
        Some(trim_poly(poly))
    }
}

fn poly_add(a: &[f64], b: &[f64], sign: f64) -> Vec<f64> {
    let mut out = vec![0.0; a.len().max(b.len())];
    for (i, c) in a.iter().enumerate() {
        out[i] += c;
    }
    for (i, c) in b.iter().enumerate() {
        out[i] += sign * c;
    }
    out
}

fn poly_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return vec![];
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            out[i + j] += ca * cb;
        }
    }
    out
}

fn trim_poly(mut p: Vec<f64>) -> Vec<f64> {
    while p.len() > 1 && p.last() == Some(&0.0) {
        p.pop();
    }
    p
}

// ── Tokenizer and parser ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Var,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            ' ' | '\t' | '\n' | '\r' => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                // Python-style `**` is exponentiation.
                if chars.get(i + 1) == Some(&'*') {
                    tokens.push(Token::Caret);
                    i += 2;
                } else {
                    tokens.push(Token::Star);
                    i += 1;
                }
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '^' => {
                tokens.push(Token::Caret);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            'x' | 'X' => {
                tokens.push(Token::Var);
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let num_str: String = chars[start..i].iter().collect();
                let num: f64 = num_str
                    .parse()
                    .map_err(|_| format!("Invalid number: {}", num_str))?;
                tokens.push(Token::Number(num));
            }
            c => return Err(format!("Unexpected character: '{}'", c)),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    // expr = term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<Expr, String> {
        let mut left = self.parse_term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.consume();
                    left = Expr::Add(Box::new(left), Box::new(self.parse_term()?));
                }
                Token::Minus => {
                    self.consume();
                    left = Expr::Sub(Box::new(left), Box::new(self.parse_term()?));
                }
                _ => break,
            }
        }
        Ok(left)
    }

    // term = unary (('*' | '/') unary)*
    fn parse_term(&mut self) -> Result<Expr, String> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.consume();
                    left = Expr::Mul(Box::new(left), Box::new(self.parse_unary()?));
                }
                Token::Slash => {
                    self.consume();
                    left = Expr::Div(Box::new(left), Box::new(self.parse_unary()?));
                }
                _ => break,
            }
        }
        Ok(left)
    }

    // unary = '-' unary | power
    fn parse_unary(&mut self) -> Result<Expr, String> {
        if let Some(Token::Minus) = self.peek() {
            self.consume();
            let val = self.parse_unary()?;
            return Ok(Expr::Neg(Box::new(val)));
        }
        self.parse_power()
    }

    // power = primary ('^' unary)?   (right-associative)
    fn parse_power(&mut self) -> Result<Expr, String> {
        let base = self.parse_primary()?;
        if let Some(Token::Caret) = self.peek() {
            self.consume();
            let exp = self.parse_unary()?;
            return Ok(Expr::Pow(Box::new(base), Box::new(exp)));
        }
        Ok(base)
    }

    // primary = NUMBER | 'x' | '(' expr ')'
    fn parse_primary(&mut self) -> Result<Expr, String> {
        match self.consume() {
            Some(Token::Number(n)) => Ok(Expr::Num(*n)),
            Some(Token::Var) => Ok(Expr::Var),
            Some(Token::LParen) => {
                let val = self.parse_expr()?;
                match self.consume() {
                    Some(Token::RParen) => Ok(val),
                    _ => Err("Expected closing parenthesis".into()),
                }
            }
            Some(tok) => Err(format!("Unexpected token: {:?}", tok)),
            None => Err("Unexpected end of expression".into()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str, x: f64) -> f64 {
        parse(input).unwrap().eval(x)
    }

    #[test]
    fn constant_arithmetic() {
        assert_eq!(eval("2 + 3 * 4", 0.0), 14.0);
        assert_eq!(eval("(2 + 3) * 4", 0.0), 20.0);
    }

    #[test]
    fn variable_evaluation() {
        assert_eq!(eval("x**2 + 2*x - 3", 2.0), 5.0);
        assert_eq!(eval("x^2 + 2*x - 3", 2.0), 5.0);
    }

    #[test]
    fn unary_negation() {
        assert_eq!(eval("-x", 3.0), -3.0);
        assert_eq!(eval("-x**2", 2.0), -4.0);
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(eval("2^3^2", 0.0), 512.0);
    }

    #[test]
    fn invalid_expressions_rejected() {
        assert!(parse("2 +").is_err());
        assert!(parse("").is_err());
        assert!(parse("y + 1").is_err());
    }

    #[test]
    fn quadratic_to_poly() {
        let poly = parse("x**2 + 2*x - 3").unwrap().to_poly().unwrap();
        assert_eq!(poly, vec![-3.0, 2.0, 1.0]);
    }

    #[test]
    fn expanded_product_to_poly() {
        // (x - 1)(x + 3) = x² + 2x - 3
        let poly = parse("(x - 1) * (x + 3)").unwrap().to_poly().unwrap();
        assert_eq!(poly, vec![-3.0, 2.0, 1.0]);
    }

    #[test]
    fn constant_to_poly() {
        assert_eq!(parse("7").unwrap().to_poly().unwrap(), vec![7.0]);
    }

    #[test]
    fn division_by_x_is_not_poly() {
        assert!(parse("1 / x").unwrap().to_poly().is_none());
    }

    #[test]
    fn fractional_power_is_not_poly() {
        assert!(parse("x^0.5").unwrap().to_poly().is_none());
    }

    #[test]
    fn leading_zero_coefficients_trimmed() {
        // x² - x² + x = x
        let poly = parse("x^2 - x^2 + x").unwrap().to_poly().unwrap();
        assert_eq!(poly, vec![0.0, 1.0]);
    }
}

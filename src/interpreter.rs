/// The calculator ties the pipeline together and carries `ANS`.
///
/// A [`Calculator`](calculator::Calculator) owns a registry and the last
/// successful result. Each call to `evaluate` tokenizes the input, runs the
/// parser over the tokens and stores the value on success.
pub mod calculator;
/// The lexer module tokenizes expression text.
///
/// The lexer reads the raw source and produces a buffer of tokens, each a
/// keyword, a numeric literal or a single symbol tagged with its character
/// offset. This is the first stage of evaluation.
///
/// # Responsibilities
/// - Classifies input into keywords, numerals and symbols.
/// - Fuses a leading sign into a numeral where an operand is expected.
/// - Reports the first character no token pattern accepts.
pub mod lexer;
/// The operation module defines what can be applied to operands.
///
/// Operations come in a closed set of shapes (constants, infix operators,
/// unary, binary and variadic functions), each carrying a pure rule over
/// decimals. The parameter count is validated before a rule runs.
pub mod operation;
/// The parser module evaluates a token buffer.
///
/// Parsing and evaluation happen in one recursive-descent pass; there is no
/// intermediate syntax tree. Operator and function names are resolved
/// through the registry at the moment they are applied.
///
/// # Responsibilities
/// - Enforces additive over multiplicative precedence, left-associative.
/// - Handles groups, function calls, constants and `ANS`.
/// - Reports syntax errors with the offending token and its offset.
pub mod parser;
/// The registry maps names to operations.
///
/// It is the single extension point of the calculator: hosts add, replace
/// and remove operators and functions here.
pub mod registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PostscriptOperator {
    /// returns the sum of num1 and num2. If the result is numerically
    /// integral it is an integer; otherwise, the result is a real number
    ///
    /// Examples
    ///    3 4 add ⇒ 7
    ///    9.9 1.1 add ⇒ 11
    ///
    /// num1 num2 `add` sum
    Add,

    /// returns the result of subtracting num2 from num1
    ///
    /// num1 num2 `sub` difference
    Sub,

    /// returns the product of num1 and num2
    ///
    /// num1 num2 `mul` product
    Mul,

    /// divides num1 by num2. The result is an integer when the quotient is
    /// numerically integral, so evenly dividing integers stay integers
    ///
    /// num1 num2 `div` quotient
    Div,

    /// divides int1 by int2 and returns the remainder. Both operands must be
    /// integers; the result carries the sign of the dividend
    ///
    /// int1 int2 `mod` remainder
    Mod,

    Pop,
    Exch,
    Dup,
    Clear,

    /// counts the number of items on the operand stack and pushes this count
    /// on the operand stack
    ///
    /// `count` int
    Count,

    /// performs two entirely different functions in full PostScript; only
    /// the stack form is provided here. Duplicates the top n elements of the
    /// operand stack, preserving their order. n must lie within the current
    /// stack depth or a rangecheck error occurs
    ///
    /// any1 … anyn n `copy` any1 … anyn any1 … anyn
    Copy,

    Eq,
    Ne,
    Gt,
    Lt,

    /// creates an empty dictionary and pushes it on the operand stack. The
    /// int operand is a capacity hint and is otherwise ignored
    ///
    /// int `dict` dict
    Dict,

    Begin,
    End,

    /// associates key with value in the current dictionary—the one on the top
    /// of the dictionary stack. If key is already present in the current
    /// dictionary, def simply replaces its value; otherwise, def creates a new
    /// entry for key and stores value with it
    ///
    /// key value `def` –
    Def,

    /// removes both operands from the stack, then executes proc if bool is
    /// true. The invocation runs under the procedure's captured environment
    /// when scoping lexically
    ///
    /// bool proc `if` –
    If,

    /// removes all three operands from the stack, then executes proc1 if
    /// bool is true or proc2 if bool is false
    ///
    /// bool proc1 proc2 `ifelse` –
    IfElse,

    /// executes proc n times, or until quit
    ///
    /// int proc `repeat` –
    Repeat,

    /// executes proc repeatedly, passing it the current loop index, which
    /// starts at initial and changes by increment until it passes limit. If
    /// proc leaves the index unconsumed on top of the stack it is reclaimed
    /// before the next iteration
    ///
    /// initial increment limit proc `for` –
    For,

    Quit,

    /// writes the bytes of a string to the output sink, with no trailing
    /// newline and no delimiting parentheses
    ///
    /// string `print` –
    Print,

    /// pops an object and writes its one-line text form plus a newline
    Equals,

    /// pops an object and writes its pretty form plus a newline; arrays,
    /// procedure bodies, and dictionary entries are rendered recursively
    EqualsEquals,
}

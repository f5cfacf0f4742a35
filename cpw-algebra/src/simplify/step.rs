/// Possible simplification steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `a+(b+c) = a+b+c`
    /// `a*(b*c) = a*b*c`
    Flatten,

    /// `0+a = a`
    /// `a+0 = a`
    AddZero,

    /// `0*a = 0`
    /// `a*0 = 0`
    MultiplyZero,

    /// `2*3*a = 6a`
    /// `1*a = a`
    MultiplyNumbers,

    /// `a+a = 2a`
    /// `2a+3a = 5a`
    /// `1+2 = 3`
    /// etc.
    CombineLikeTerms,

    /// `a*a = a^2`
    /// `a^2*a^3 = a^5`
    /// `a*a^-1 = 1`
    /// etc.
    CombineLikeFactors,

    /// `2*(a+b) = 2a+2b`
    DistributeCoefficient,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `1^a = 1`
    PowerOneLeft,

    /// `2^3 = 8`
    /// `2^-1 = 1/2`
    NumericPower,

    /// `(a^b)^n = a^(b*n)`, for integer `n`
    PowerPower,

    /// `(a*b)^n = a^n*b^n`, for integer `n`
    DistributePower,

    /// `abs(-3) = 3`
    /// `abs(abs(a)) = abs(a)`
    /// `abs(-2a) = 2abs(a)`
    Abs,

    /// `sqrt(9/4) = 3/2`
    /// `sqrt(a^2) = abs(a)`
    Sqrt,

    /// `cos(0) = 1`
    /// `cos(pi/3) = 1/2`
    Cos,

    /// `acos(1) = 0`
    /// `acos(0) = pi/2`
    Acos,

    /// `heaviside(2, 0) = 1`
    Heaviside,

    /// `abs(a)^2 = a^2`
    AbsSquare,

    /// `c*abs(a)*abs(b) = c*abs(a*b)`
    AbsProduct,
}

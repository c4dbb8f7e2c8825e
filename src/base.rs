mod parser;

pub(crate) use self::parser::Parser;

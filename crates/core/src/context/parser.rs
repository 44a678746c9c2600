// SPDX-License-Identifier: MIT

//! Recursive-descent parser over [`super::lexer::Token`]: `||` binds
//! loosest, `&&` tighter, both left-associative.

use super::ast::{Predicate, Rule, SingleRule};
use super::eval::RuleError;
use super::lexer::{self, Token};

pub fn parse(input: &str) -> Result<Rule, RuleError> {
    let tokens = lexer::lex(input)?;
    let mut parser = Parser { tokens: &tokens, pos: 0 };
    let rule = parser.parse_or()?;
    if parser.pos != parser.tokens.len() {
        return Err(RuleError::UnexpectedToken(format!("{:?}", parser.tokens[parser.pos])));
    }
    Ok(rule)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        self.pos += 1;
        tok
    }

    fn parse_or(&mut self) -> Result<Rule, RuleError> {
        let mut lhs = self.parse_and()?;
        while matches!(self.peek(), Some(Token::OrOr)) {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = Rule::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Rule, RuleError> {
        let mut lhs = self.parse_single()?;
        while matches!(self.peek(), Some(Token::AndAnd)) {
            self.advance();
            let rhs = self.parse_single()?;
            lhs = Rule::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_single(&mut self) -> Result<Rule, RuleError> {
        let key = match self.advance() {
            Some(Token::Ident(key)) => key.clone(),
            other => return Err(RuleError::UnexpectedToken(format!("{other:?}"))),
        };

        let predicate = match self.advance() {
            Some(Token::Op(op)) => {
                let value = match self.advance() {
                    Some(Token::Ident(value)) => value.clone(),
                    other => return Err(RuleError::UnexpectedToken(format!("{other:?}"))),
                };
                Predicate::Compare(*op, value)
            }
            Some(Token::Is) => match self.advance() {
                Some(Token::Defined) => Predicate::IsDefined,
                Some(Token::Not) => match self.advance() {
                    Some(Token::Defined) => Predicate::IsNotDefined,
                    other => return Err(RuleError::UnexpectedToken(format!("{other:?}"))),
                },
                other => return Err(RuleError::UnexpectedToken(format!("{other:?}"))),
            },
            other => return Err(RuleError::UnexpectedToken(format!("{other:?}"))),
        };

        Ok(Rule::Single(SingleRule { key, predicate }))
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;

//! Interactive search prompt
//!
//! Reads the search terms and the four demographic answers line by line,
//! then prints the ranked scheme names.

use schemerec_core::{
    AgeBracket, Demographics, Domicile, EligibilityFilter, Gender, QueryRanker, Recommendation,
    SearchQuery, SocialCategory, UnknownLabel,
};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Blank answers are omitted; unrecognized labels are reported and omitted
fn parse_answer<T>(answer: &str) -> Option<T>
where
    T: FromStr<Err = UnknownLabel>,
{
    if answer.is_empty() {
        return None;
    }
    match answer.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring answer: {}", e);
            None
        }
    }
}

/// Ask the five questions and build the query
pub fn read_query<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<SearchQuery> {
    let terms = ask(input, output, "Enter search terms (separated by space): ")?;
    let age = ask(input, output, "Enter age range: ")?;
    let social_category = ask(input, output, "Enter social category (SC/ST/OBC): ")?;
    let gender = ask(input, output, "Enter gender (M/F/T): ")?;
    let domicile = ask(input, output, "Is domicile of Tripura? (Y/N): ")?;

    let demographics = Demographics {
        age: parse_answer::<AgeBracket>(&age),
        social_category: parse_answer::<SocialCategory>(&social_category),
        gender: parse_answer::<Gender>(&gender),
        domicile: parse_answer::<Domicile>(&domicile),
    };

    Ok(SearchQuery::new(terms.split_whitespace()).with_demographics(demographics))
}

pub fn print_recommendations<W: Write>(output: &mut W, results: &[Recommendation]) -> io::Result<()> {
    writeln!(output, "Content-based Filtering:")?;
    writeln!(
        output,
        "The suggested schemes based on search terms and additional parameters are: \n"
    )?;
    for rec in results {
        writeln!(output, "{}", rec.name)?;
    }
    Ok(())
}

/// One prompt round: read, rank, print
pub fn run<R: BufRead, W: Write>(
    ranker: &QueryRanker<'_>,
    input: &mut R,
    output: &mut W,
    limit: usize,
    strict_eligibility: bool,
) -> io::Result<Vec<Recommendation>> {
    let query = read_query(input, output)?;
    let text = query.to_text();
    tracing::debug!("Search query: {:?}", text);

    let results = if strict_eligibility {
        let filter = EligibilityFilter::new(query.demographics.clone());
        ranker.recommend_filtered(&text, limit, &filter)
    } else {
        ranker.recommend(&text, limit)
    };

    print_recommendations(output, &results)?;
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemerec_core::{Scheme, TfidfVectorizer, VectorSpaceConfig};

    #[test]
    fn test_read_query() {
        let mut input = "Mukhya  scholarship\n21-25\nST\nM\nY\n".as_bytes();
        let mut output = Vec::new();
        let query = read_query(&mut input, &mut output).unwrap();

        assert_eq!(query.terms, vec!["Mukhya", "scholarship"]);
        assert_eq!(query.to_text(), "Mukhya scholarship 21-25 ST M Y");
        let prompts = String::from_utf8(output).unwrap();
        assert!(prompts.contains("Enter social category (SC/ST/OBC): "));
    }

    #[test]
    fn test_blank_and_unknown_answers_are_omitted() {
        let mut input = "pension\n\nGEN\nF\n".as_bytes();
        let query = read_query(&mut input, &mut Vec::new()).unwrap();

        assert_eq!(query.demographics.age, None);
        assert_eq!(query.demographics.social_category, None);
        assert_eq!(query.demographics.gender, Some(Gender::Female));
        assert_eq!(query.demographics.domicile, None);
    }

    #[test]
    fn test_run_prints_ranked_names() {
        let make = |name: &str, description: &str, gender: Gender| Scheme {
            name: name.to_string(),
            description: description.to_string(),
            age: AgeBracket::From16To20,
            social_category: SocialCategory::St,
            gender,
            domicile: Domicile::Yes,
            user_id: None,
        };
        let schemes = vec![
            make("SchemeB", "healthcare subsidy for elderly", Gender::Male),
            make("SchemeA", "education scholarship for students", Gender::Male),
            make("SchemeC", "scholarship for girls", Gender::Female),
        ];
        let (vectorizer, matrix) =
            TfidfVectorizer::fit_schemes(&schemes, &VectorSpaceConfig::default()).unwrap();
        let ranker = QueryRanker::new(&schemes, &vectorizer, &matrix).unwrap();

        let mut output = Vec::new();
        let mut input = "education scholarship\n\n\n\n\n".as_bytes();
        let results = run(&ranker, &mut input, &mut output, 1, false).unwrap();
        assert_eq!(results[0].name, "SchemeA");
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("Content-based Filtering:\n"));
        assert!(printed.ends_with("SchemeA\n"));

        let mut input = "scholarship\n\n\nF\n\n".as_bytes();
        let results = run(&ranker, &mut input, &mut Vec::new(), 5, true).unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["SchemeC"]);
    }
}

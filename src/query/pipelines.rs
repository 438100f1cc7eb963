//! Aggregation pipelines run by the demo.

use mongodb::bson::{doc, Document};

/// Mean price per genre: `{_id: <genre>, avgPrice: <mean>}`.
pub fn average_price_by_genre() -> Vec<Document> {
    vec![doc! {
        "$group": {
            "_id": "$genre",
            "avgPrice": { "$avg": "$price" },
        }
    }]
}

/// Authors ranked by number of books, keeping the first `limit` groups:
/// `{_id: <author>, totalBooks: <count>}`.
///
/// Equal counts are ordered by author name so the top group is stable.
pub fn top_authors(limit: i64) -> Vec<Document> {
    vec![
        doc! {
            "$group": {
                "_id": "$author",
                "totalBooks": { "$sum": 1 },
            }
        },
        doc! { "$sort": { "totalBooks": -1, "_id": 1 } },
        doc! { "$limit": limit },
    ]
}

/// Book count per publication decade: `{decade: <first year>, totalBooks: <count>}`.
///
/// The bucket is `floor(published_year / 10)`, projected back out times ten.
pub fn books_by_decade() -> Vec<Document> {
    vec![
        doc! {
            "$group": {
                "_id": { "$floor": { "$divide": ["$published_year", 10] } },
                "totalBooks": { "$sum": 1 },
            }
        },
        doc! {
            "$project": {
                "decade": { "$multiply": ["$_id", 10] },
                "totalBooks": 1,
                "_id": 0,
            }
        },
    ]
}

/// Stage names of a pipeline, logged with each aggregation step.
pub fn stage_names(pipeline: &[Document]) -> Vec<&str> {
    pipeline
        .iter()
        .filter_map(|stage| stage.keys().next().map(String::as_str))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_price_groups_by_genre() {
        let pipeline = average_price_by_genre();
        assert_eq!(stage_names(&pipeline), vec!["$group"]);

        let group = pipeline[0].get_document("$group").unwrap();
        assert_eq!(group.get_str("_id").unwrap(), "$genre");
        assert_eq!(
            group.get_document("avgPrice").unwrap(),
            &doc! { "$avg": "$price" }
        );
    }

    #[test]
    fn test_top_authors_sorts_then_limits() {
        let pipeline = top_authors(1);
        assert_eq!(stage_names(&pipeline), vec!["$group", "$sort", "$limit"]);

        let sort = pipeline[1].get_document("$sort").unwrap();
        assert_eq!(sort.get_i32("totalBooks").unwrap(), -1);
        assert_eq!(pipeline[2].get_i64("$limit").unwrap(), 1);
    }

    #[test]
    fn test_decade_uses_floor_division() {
        let pipeline = books_by_decade();
        assert_eq!(stage_names(&pipeline), vec!["$group", "$project"]);

        let group = pipeline[0].get_document("$group").unwrap();
        assert_eq!(
            group.get_document("_id").unwrap(),
            &doc! { "$floor": { "$divide": ["$published_year", 10] } }
        );

        let project = pipeline[1].get_document("$project").unwrap();
        assert_eq!(project.get_i32("_id").unwrap(), 0);
        assert_eq!(project.get_i32("totalBooks").unwrap(), 1);
        assert_eq!(
            project.get_document("decade").unwrap(),
            &doc! { "$multiply": ["$_id", 10] }
        );
    }
}

//! The demonstration: an ordered list of labelled steps.

use mongodb::bson::doc;

use super::operation::Operation;
use crate::books::fields;
use crate::query::{pipelines, Filter, FindSpec, IndexSpec, Predicate, Projection, SortSpec};

/// Books per page in the pagination steps
pub const PAGE_SIZE: i64 = 5;

/// One labelled operation
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Human-readable prefix of the report line
    pub label: &'static str,
    pub operation: Operation,
}

impl Step {
    pub fn new(label: &'static str, operation: Operation) -> Self {
        Self { label, operation }
    }
}

/// The full query sequence, in execution order.
pub fn demo_plan() -> Vec<Step> {
    let mut steps = Vec::with_capacity(16);

    // Basic queries
    steps.push(Step::new(
        "Fiction Books",
        Operation::Find(FindSpec::filtered(Predicate::eq(fields::GENRE, "Fiction"))),
    ));
    steps.push(Step::new(
        "Books published after 2010",
        Operation::Find(FindSpec::filtered(Predicate::gt(fields::PUBLISHED_YEAR, 2010))),
    ));
    steps.push(Step::new(
        "Books by George Orwell",
        Operation::Find(FindSpec::filtered(Predicate::eq(fields::AUTHOR, "George Orwell"))),
    ));
    steps.push(Step::new(
        "Updated price result",
        Operation::UpdateOne {
            filter: Predicate::eq(fields::TITLE, "1984").into(),
            update: doc! { "$set": { "price": 15.99 } },
        },
    ));
    steps.push(Step::new(
        "Deleted book result",
        Operation::DeleteOne {
            filter: Predicate::eq(fields::TITLE, "The Catcher in the Rye").into(),
        },
    ));

    // Projection, sorting, pagination
    steps.push(Step::new(
        "In-stock books published after 2010",
        Operation::Find(
            FindSpec::filtered(
                Filter::all()
                    .and(Predicate::eq(fields::IN_STOCK, true))
                    .and(Predicate::gt(fields::PUBLISHED_YEAR, 2010)),
            )
            .with_projection(
                Projection::include([fields::TITLE, fields::AUTHOR, fields::PRICE]).without_id(),
            ),
        ),
    ));
    steps.push(Step::new(
        "Books sorted by price (ascending)",
        Operation::Find(FindSpec::all().with_sort(SortSpec::asc(fields::PRICE))),
    ));
    steps.push(Step::new(
        "Books sorted by price (descending)",
        Operation::Find(FindSpec::all().with_sort(SortSpec::desc(fields::PRICE))),
    ));
    steps.push(Step::new(
        "Page 1",
        Operation::Find(FindSpec::all().page(1, PAGE_SIZE)),
    ));
    steps.push(Step::new(
        "Page 2",
        Operation::Find(FindSpec::all().page(2, PAGE_SIZE)),
    ));

    // Aggregation
    steps.push(Step::new(
        "Average price by genre",
        Operation::Aggregate(pipelines::average_price_by_genre()),
    ));
    steps.push(Step::new(
        "Author with most books",
        Operation::Aggregate(pipelines::top_authors(1)),
    ));
    steps.push(Step::new(
        "Books grouped by decade",
        Operation::Aggregate(pipelines::books_by_decade()),
    ));

    // Indexing
    steps.push(Step::new(
        "Index created on title",
        Operation::CreateIndex(IndexSpec::ascending(fields::TITLE)),
    ));
    steps.push(Step::new(
        "Compound index created on author and published_year",
        Operation::CreateIndex(IndexSpec::compound([fields::AUTHOR, fields::PUBLISHED_YEAR])),
    ));
    steps.push(Step::new(
        "Explain plan for indexed search",
        Operation::Explain(FindSpec::filtered(Predicate::eq(fields::TITLE, "1984"))),
    ));

    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_order() {
        let kinds: Vec<_> = demo_plan().iter().map(|s| s.operation.kind()).collect();

        assert_eq!(
            kinds,
            vec![
                "find",
                "find",
                "find",
                "update_one",
                "delete_one",
                "find",
                "find",
                "find",
                "find",
                "find",
                "aggregate",
                "aggregate",
                "aggregate",
                "create_index",
                "create_index",
                "explain",
            ]
        );
    }

    #[test]
    fn test_labels_unique() {
        let plan = demo_plan();
        let mut labels: Vec<_> = plan.iter().map(|s| s.label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), plan.len());
    }

    #[test]
    fn test_update_targets_one_title() {
        let plan = demo_plan();
        let Operation::UpdateOne { filter, update } = &plan[3].operation else {
            panic!("step 4 should be an update");
        };

        assert_eq!(filter.to_document(), doc! { "title": "1984" });
        assert_eq!(update, &doc! { "$set": { "price": 15.99 } });
    }

    #[test]
    fn test_projection_step_hides_id() {
        let plan = demo_plan();
        let Operation::Find(spec) = &plan[5].operation else {
            panic!("step 6 should be a find");
        };

        assert_eq!(
            spec.filter_document(),
            doc! { "in_stock": true, "published_year": { "$gt": 2010 } }
        );
        assert_eq!(
            spec.options().projection,
            Some(doc! { "title": 1, "author": 1, "price": 1, "_id": 0 })
        );
    }

    #[test]
    fn test_pages_do_not_sort() {
        let plan = demo_plan();
        let (Operation::Find(first), Operation::Find(second)) =
            (&plan[8].operation, &plan[9].operation)
        else {
            panic!("steps 9 and 10 should be finds");
        };

        assert_eq!(first.sort, None);
        assert_eq!((first.skip, first.limit), (None, Some(PAGE_SIZE)));
        assert_eq!((second.skip, second.limit), (Some(5), Some(PAGE_SIZE)));
    }
}

use crate::models::tickets::TicketStatus;

/// Sortable ticket fields. Prefix with `-` in the textual form for descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketSortField {
    CreatedAt,
    UpdatedAt,
    Priority,
    Status,
}

impl TicketSortField {
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "created_at" => Some(Self::CreatedAt),
            "updated_at" => Some(Self::UpdatedAt),
            "priority" => Some(Self::Priority),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketSort {
    pub field: TicketSortField,
    pub ascending: bool,
}

impl Default for TicketSort {
    /// Newest first.
    fn default() -> Self {
        Self {
            field: TicketSortField::CreatedAt,
            ascending: false,
        }
    }
}

/// Parses a comma-separated sort string such as `-priority,created_at`.
///
/// Returns `None` if any field is unknown.
pub fn parse_ticket_sort(raw: &str) -> Option<Vec<TicketSort>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.strip_prefix('-') {
            Some(field) => TicketSortField::parse(field).map(|field| TicketSort {
                field,
                ascending: false,
            }),
            None => TicketSortField::parse(s).map(|field| TicketSort {
                field,
                ascending: true,
            }),
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub created_by: Option<i64>,
    pub assigned_to: Option<i64>,
    pub status: Option<TicketStatus>,
    pub category_id: Option<i64>,
    /// Case-insensitive substring match on title or description.
    pub query: Option<String>,
    pub sort: Vec<TicketSort>,
}

impl TicketFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_created_by(mut self, user_id: i64) -> Self {
        self.created_by = Some(user_id);
        self
    }

    pub fn with_assigned_to(mut self, user_id: i64) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_category_id(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_query(mut self, query: String) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_sort(mut self, sort: Vec<TicketSort>) -> Self {
        self.sort = sort;
        self
    }
}
